//! `${VAR}` expansion for string values in `dox.toml`.
//!
//! `${VAR}` is replaced by the variable's value and `${VAR:-default}` falls
//! back to `default` when VAR is unset. Values without a `${` are returned
//! as written, so a lone `$VAR` stays literal.

use std::env::{self, VarError};
use std::fmt;

use crate::ConfigError;

/// Expand an optional field in place, leaving `None` untouched.
pub(crate) fn expand_field(slot: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(value) = slot.as_mut() {
        *value = expand_env(value, field)?;
    }
    Ok(())
}

/// Expand every `${...}` reference in `value`.
///
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, lookup).map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: e.cause.to_string(),
    })?;
    Ok(expanded.into_owned())
}

fn lookup(name: &str) -> Result<Option<String>, Unresolved> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Err(Unresolved::Unset(name.to_owned())),
        Err(VarError::NotUnicode(_)) => Err(Unresolved::NotUnicode(name.to_owned())),
    }
}

/// Why a `${VAR}` reference could not be substituted.
enum Unresolved {
    Unset(String),
    NotUnicode(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset(name) => write!(f, "${{{name}}} not set"),
            Self::NotUnicode(name) => write!(f, "${{{name}}} is not valid unicode"),
        }
    }
}
