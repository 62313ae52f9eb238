//! `dox routes` command implementation.

use clap::Args;

use super::{CommonArgs, build_cache, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl RoutesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let index = load_index(&build_cache(&config)?, &output)?;

        for route in index.routes() {
            output.data(route)?;
        }
        Ok(())
    }
}
