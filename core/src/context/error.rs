//! Error types for settings access

use std::path::PathBuf;
use thiserror::Error;

/// Errors during settings document operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve the settings file location")]
    ResolvePath(#[source] confy::ConfyError),

    #[error("failed to load settings from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to store settings to {path}")]
    Store {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
}
