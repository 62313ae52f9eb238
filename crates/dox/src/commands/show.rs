//! `dox show` command implementation.

use clap::Args;
use dox_site::ManifestEntry;

use super::{CommonArgs, build_cache, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Document slug (e.g., `functions/retries`).
    slug: String,
}

impl ShowArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let index = load_index(&build_cache(&config)?, &output)?;

        let doc = index.require(self.slug.trim_matches('/'))?;
        let entry = ManifestEntry {
            route: doc.route(index.route_prefix()),
            source: &doc.source,
            meta: &doc.meta,
        };

        output.detail(&doc.source.display().to_string());
        output.data(&serde_json::to_string_pretty(&entry)?)?;
        Ok(())
    }
}
