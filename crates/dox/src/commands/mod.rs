//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod routes;
pub(crate) mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use dox_config::{CliSettings, Config, Profile};
use dox_site::{BuildCache, BuildProfile, DocsIndex, DocumentLoader, LoadError, LoaderConfig};
use dox_storage::Storage;
use dox_storage_fs::FsStorage;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use show::ShowArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover dox.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Use the development profile (rebuild the index on every access).
    #[arg(long)]
    dev: bool,

    /// Enable verbose output (timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            profile: self.dev.then_some(Profile::Development),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build cache over filesystem storage as described by `config`.
pub(crate) fn build_cache(config: &Config) -> Result<BuildCache, CliError> {
    let docs = &config.docs_resolved;
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_patterns(
        docs.source_dir.clone(),
        &docs.patterns,
    )?);
    let loader = DocumentLoader::new(storage, loader_config(config));
    Ok(BuildCache::new(loader, build_profile(docs.profile)))
}

/// Fetch the index, listing every content violation before failing.
pub(crate) fn load_index(cache: &BuildCache, output: &Output) -> Result<Arc<DocsIndex>, CliError> {
    cache.index().map_err(|err| {
        report_invalid(output, &err);
        CliError::Load(err)
    })
}

/// Print each validation failure carried by `err`.
pub(crate) fn report_invalid(output: &Output, err: &LoadError) {
    for content_error in err.content_errors() {
        output.warning(&format!("  {content_error}"));
    }
}

fn loader_config(config: &Config) -> LoaderConfig {
    let docs = &config.docs_resolved;
    LoaderConfig {
        route_prefix: docs.route_prefix.clone(),
        secondary_type: docs.secondary.content_type.clone(),
        secondary_prefix: docs.secondary.prefix.clone(),
        words_per_minute: config.reading.words_per_minute,
    }
}

fn build_profile(profile: Profile) -> BuildProfile {
    match profile {
        Profile::Production => BuildProfile::Production,
        Profile::Development => BuildProfile::Development,
    }
}
