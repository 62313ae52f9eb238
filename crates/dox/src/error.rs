//! CLI error types.

use dox_config::ConfigError;
use dox_site::{LoadError, NotFound};
use dox_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    NotFound(#[from] NotFound),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
