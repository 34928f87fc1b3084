//! Upward search for the project configuration file.

use camino::{Utf8Path, Utf8PathBuf};

use super::{CONFIG_FILE_NAME, ConfigError};

/// Returns the `r.toml` closest to `start`.
///
/// `start` itself is checked first, then each ancestor up to and including
/// the filesystem root, so a nested project overrides an enclosing one.
/// Callers pass a canonical path so that symlinked directories resolve to
/// the real project root.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when no ancestor holds a regular file
/// named `r.toml`.
pub fn find_config_file(start: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ConfigError::NotFound {
            start: start.to_path_buf(),
        })
}
