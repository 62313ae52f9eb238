//! dox CLI - Documentation corpus loader.
//!
//! Provides commands for:
//! - `build`: Build the docs index and write a JSON manifest
//! - `check`: Validate front matter across the corpus
//! - `routes`: Print every static route
//! - `show`: Print one document's metadata and headings
//! - `nav`: Print the navigation tree

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, NavArgs, RoutesArgs, ShowArgs};
use output::Output;

/// dox - Documentation corpus loader.
#[derive(Parser)]
#[command(name = "dox", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the docs index and write a JSON manifest.
    Build(BuildArgs),
    /// Validate every content file and report all violations.
    Check(CheckArgs),
    /// Print every static route, one per line.
    Routes(RoutesArgs),
    /// Print a document's metadata and heading index as JSON.
    Show(ShowArgs),
    /// Print the navigation tree of a content set as JSON.
    Nav(NavArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.common.verbose,
            Self::Check(args) => args.common.verbose,
            Self::Routes(args) => args.common.verbose,
            Self::Show(args) => args.common.verbose,
            Self::Nav(args) => args.common.verbose,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_flag_per_command() {
        let cli = Cli::try_parse_from(["dox", "routes", "-v"]).unwrap();
        assert!(cli.command.verbose());

        let cli = Cli::try_parse_from(["dox", "show", "functions/retries"]).unwrap();
        assert!(!cli.command.verbose());
    }

    #[test]
    fn test_nav_rejects_unknown_set() {
        assert!(Cli::try_parse_from(["dox", "nav", "--set", "cloud"]).is_err());
    }
}
