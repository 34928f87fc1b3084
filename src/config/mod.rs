//! Project configuration discovered from `r.toml`.
//!
//! The nearest `r.toml` above the working directory anchors the project: its
//! parent directory is the local sync root, `remote` names the matching
//! directory on the remote host, and `ignores` lists exclusion rules for the
//! synchroniser. Rules starting with `/` match paths relative to the project
//! root; every other rule matches file or directory names anywhere in the
//! tree.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use ortho_config::toml;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod locator;

pub use locator::find_config_file;

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "r.toml";

/// Errors raised while locating or loading `r.toml`.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Raised when no `r.toml` exists in the start directory or any parent.
    #[error("no config file r.toml found in {start} or any of its parents")]
    NotFound {
        /// Directory the upward search started from.
        start: Utf8PathBuf,
    },
    /// Raised when the configuration file cannot be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path that could not be read.
        path: Utf8PathBuf,
        /// Operating system error string.
        message: String,
    },
    /// Raised when the file is not valid TOML for the expected schema.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Parser error message.
        message: String,
    },
    /// Raised when `remote` is not of the form `<host>:<path>`.
    #[error("invalid remote {value:?}: expected <host>:<absolute-path>")]
    InvalidRemote {
        /// Raw value supplied for `remote`.
        value: String,
    },
    /// Raised when a name pattern contains a path separator.
    #[error(
        "ignore {pattern:?} contains '/' but does not start with it; \
         use a bare name or a path anchored with a leading '/'"
    )]
    AmbiguousIgnore {
        /// Offending ignore entry.
        pattern: String,
    },
}

/// On-disk shape of `r.toml`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub(crate) struct ConfigFile {
    pub(crate) remote: String,
    #[serde(default)]
    pub(crate) ignores: Vec<String>,
}

/// Remote address split into host and path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSpec {
    /// Host identifier handed to `ssh` and `unison`.
    pub host: String,
    /// Absolute directory on the remote host.
    pub path: String,
}

impl RemoteSpec {
    /// Splits `<host>:<path>` on the first `:`.
    ///
    /// Anything after the first colon belongs to the path, so paths may
    /// themselves contain colons.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRemote`] when the separator is missing,
    /// the host is empty, or the path does not start with `/`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRemote {
            value: value.to_owned(),
        };
        let (host, path) = value.split_once(':').ok_or_else(invalid)?;
        if host.trim().is_empty() || !path.starts_with('/') {
            return Err(invalid());
        }

        Ok(Self {
            host: host.to_owned(),
            path: path.to_owned(),
        })
    }
}

/// Validated project configuration for a single invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Directory containing `r.toml`; the local sync root.
    pub root_directory: Utf8PathBuf,
    /// Host identifier passed to the remote shell.
    pub remote_host: String,
    /// Remote directory corresponding to [`Self::root_directory`].
    pub remote_path: String,
    /// Patterns matched against file and directory names.
    pub name_ignores: Vec<String>,
    /// Patterns matched against paths relative to the project root.
    pub path_ignores: Vec<String>,
}

impl ProjectConfig {
    /// Locates the nearest `r.toml` above `start` and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no file is found or loading fails.
    pub fn discover(start: &Utf8Path) -> Result<Self, ConfigError> {
        let path = find_config_file(start)?;
        Self::load(&path)
    }

    /// Reads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, when
    /// `remote` is malformed, or when an ignore entry is ambiguous.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = read_config(path)?;
        let file: ConfigFile = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        let root_directory = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };
        Self::from_file(root_directory, file)
    }

    pub(crate) fn from_file(
        root_directory: Utf8PathBuf,
        file: ConfigFile,
    ) -> Result<Self, ConfigError> {
        let remote = RemoteSpec::parse(&file.remote)?;
        let (name_ignores, path_ignores) = classify_ignores(file.ignores)?;

        Ok(Self {
            root_directory,
            remote_host: remote.host,
            remote_path: remote.path,
            name_ignores,
            path_ignores,
        })
    }
}

fn classify_ignores(entries: Vec<String>) -> Result<(Vec<String>, Vec<String>), ConfigError> {
    let mut names = Vec::new();
    let mut paths = Vec::new();

    for entry in entries {
        if let Some(anchored) = entry.strip_prefix('/') {
            paths.push(anchored.to_owned());
        } else if entry.contains('/') {
            return Err(ConfigError::AmbiguousIgnore { pattern: entry });
        } else {
            names.push(entry);
        }
    }

    Ok((names, paths))
}

fn read_config(path: &Utf8Path) -> Result<String, ConfigError> {
    let io_error = |message: String| ConfigError::Io {
        path: path.to_path_buf(),
        message,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io_error(String::from("configuration path is missing a filename")))?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| io_error(err.to_string()))?;
    dir.read_to_string(file_name)
        .map_err(|err| io_error(err.to_string()))
}
