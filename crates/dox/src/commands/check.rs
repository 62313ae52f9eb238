//! `dox check` command implementation.

use clap::Args;

use super::{CommonArgs, build_cache, report_invalid};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let cache = build_cache(&config)?;

        match cache.loader().load() {
            Ok(loaded) => {
                if loaded.documents.is_empty() {
                    output.warning(&format!(
                        "No documents found in {}",
                        config.docs_resolved.source_dir.display()
                    ));
                } else {
                    output.success(&format!("{} documents OK", loaded.documents.len()));
                }
                Ok(())
            }
            Err(err) => {
                report_invalid(&output, &err);
                Err(err.into())
            }
        }
    }
}
