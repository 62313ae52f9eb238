//! `dox build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use super::{CommonArgs, build_cache, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Manifest output path (default: .dox/index.json).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let docs = &config.docs_resolved;

        output.info(&format!("Source: {}", docs.source_dir.display()));

        let cache = build_cache(&config)?;
        let index = load_index(&cache, &output)?;

        let manifest_path = match self.output {
            Some(path) => path,
            None => {
                ensure_project_dir(&docs.project_dir)?;
                docs.manifest_path()
            }
        };
        write_manifest(&manifest_path, &serde_json::to_string_pretty(&index.manifest())?)?;

        let categories = index.category_tree().len();
        output.success(&format!(
            "Indexed {} documents in {categories} categories to {}",
            index.len(),
            manifest_path.display()
        ));
        Ok(())
    }
}

fn write_manifest(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "Manifest written");
    Ok(())
}

/// Ensure the `.dox/` project directory exists with a `.gitignore`.
fn ensure_project_dir(project_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(project_dir)?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let _ = std::fs::write(&gitignore_path, "# Automatically created by dox\n*\n");
    }

    Ok(())
}
