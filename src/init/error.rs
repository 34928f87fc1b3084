//! Error types for the init workflow.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while creating `r.toml`.
#[derive(Debug, Error)]
pub enum InitError {
    /// Raised when the target directory already holds a configuration file.
    #[error("config file {path} already exists")]
    AlreadyExists {
        /// Path of the existing file.
        path: Utf8PathBuf,
    },
    /// Raised when the answer is not of the form `<host>:<path>`.
    #[error(transparent)]
    InvalidRemote(#[from] ConfigError),
    /// Raised when the remote address cannot be read from the user.
    #[error("failed to read remote address: {message}")]
    Prompt {
        /// Human-readable description of the failure.
        message: String,
    },
    /// Raised when the configuration file cannot be written.
    #[error("failed to write {path}: {message}")]
    Io {
        /// Path that could not be written.
        path: Utf8PathBuf,
        /// Operating system error string.
        message: String,
    },
    /// Raised when the configuration cannot be rendered as TOML.
    #[error("failed to render configuration: {0}")]
    Serialize(String),
}
