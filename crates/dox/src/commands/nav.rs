//! `dox nav` command implementation.

use clap::{Args, ValueEnum};
use dox_site::ContentSet;

use super::{CommonArgs, build_cache, load_index};
use crate::error::CliError;
use crate::output::Output;

/// Content set selector.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum SetArg {
    Primary,
    Secondary,
}

impl From<SetArg> for ContentSet {
    fn from(arg: SetArg) -> Self {
        match arg {
            SetArg::Primary => Self::Primary,
            SetArg::Secondary => Self::Secondary,
        }
    }
}

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Content set to print.
    #[arg(long, value_enum, default_value_t = SetArg::Primary)]
    set: SetArg,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let index = load_index(&build_cache(&config)?, &output)?;

        let navigation = index.navigation(self.set.into());
        output.data(&serde_json::to_string_pretty(&navigation)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_arg_conversion() {
        assert_eq!(ContentSet::from(SetArg::Primary), ContentSet::Primary);
        assert_eq!(ContentSet::from(SetArg::Secondary), ContentSet::Secondary);
    }
}
