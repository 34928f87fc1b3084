//! Tool settings naming the external synchroniser and remote shell.
//!
//! [`SyncConfig`] is loaded via `ortho-config`, which merges defaults,
//! configuration files, and `R_*` environment variables. It deliberately
//! knows nothing about a particular project; that lives in `r.toml`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default synchroniser executable.
pub const DEFAULT_UNISON_BIN: &str = "unison";

/// Default remote shell executable.
pub const DEFAULT_SSH_BIN: &str = "ssh";

/// External tool settings loaded via `ortho-config`.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "R",
    discovery(
        app_name = "r",
        env_var = "R_CONFIG_PATH",
        config_file_name = "tools.toml",
        dotfile_name = ".r-tools.toml",
        project_file_name = ".r-tools.toml"
    )
)]
pub struct SyncConfig {
    /// Path to the `unison` executable.
    #[ortho_config(default = DEFAULT_UNISON_BIN.to_owned())]
    pub unison_bin: String,
    /// Path to the `ssh` executable.
    #[ortho_config(default = DEFAULT_SSH_BIN.to_owned())]
    pub ssh_bin: String,
}

/// Errors raised when loading tool settings from layered sources.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SyncConfigLoadError {
    /// Indicates that parsing or merging configuration layers failed.
    #[error("tool settings parsing failed: {0}")]
    Parse(String),
}

impl SyncConfig {
    /// Ensures both executables are named after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when a field is empty.
    pub fn validate(&self) -> Result<(), SyncError> {
        Self::require_value(&self.unison_bin, "unison_bin")?;
        Self::require_value(&self.ssh_bin, "ssh_bin")?;
        Ok(())
    }

    /// Loads settings from defaults, configuration files, and environment
    /// variables without parsing the process arguments, which belong to the
    /// remote command.
    ///
    /// # Errors
    ///
    /// Returns [`SyncConfigLoadError::Parse`] when merging sources fails.
    pub fn load_without_cli_args() -> Result<Self, SyncConfigLoadError> {
        Self::load_from_iter([OsString::from("r")])
            .map_err(|err| SyncConfigLoadError::Parse(err.to_string()))
    }

    fn require_value(value: &str, field: &str) -> Result<(), SyncError> {
        if value.trim().is_empty() {
            return Err(SyncError::InvalidConfig {
                field: field.to_owned(),
            });
        }
        Ok(())
    }
}

/// Errors surfaced while synchronising or executing remotely.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SyncError {
    /// Raised when a tool setting is empty. The message names the
    /// environment variable that overrides it.
    #[error(
        "missing {field}: set R_{env_suffix} or add {field} to .r-tools.toml",
        env_suffix = .field.to_uppercase()
    )]
    InvalidConfig {
        /// Setting that failed validation.
        field: String,
    },
    /// Raised when a command cannot be spawned.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Command that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when the synchroniser completes with a non-zero exit code.
    #[error("command exited with status {status_text}: {command}")]
    CommandFailure {
        /// Full command line, shell-quoted for copy and paste.
        command: String,
        /// Exit status as reported by the OS.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
    },
}
