//! Mapping between the local working directory and the remote tree.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors raised while mapping the working directory into the project.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PathError {
    /// Raised when the tool is invoked outside the project tree.
    #[error("current directory {cwd} is not inside the project rooted at {root}")]
    OutsideProject {
        /// Working directory the tool was invoked from.
        cwd: Utf8PathBuf,
        /// Directory containing `r.toml`.
        root: Utf8PathBuf,
    },
}

/// Returns `cwd` relative to `root`.
///
/// The comparison is component-wise, so `/proj2` is not considered to be
/// inside `/proj`. When `cwd` equals `root` the result is empty.
///
/// # Errors
///
/// Returns [`PathError::OutsideProject`] when `cwd` is neither `root` nor a
/// descendant of it.
pub fn relative_path(cwd: &Utf8Path, root: &Utf8Path) -> Result<Utf8PathBuf, PathError> {
    cwd.strip_prefix(root)
        .map(Utf8Path::to_path_buf)
        .map_err(|_| PathError::OutsideProject {
            cwd: cwd.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// Joins `relative` onto the remote root using `/` separators.
///
/// The remote side is always POSIX, so only the normal components of
/// `relative` are used and the local separator never leaks into the result.
#[must_use]
pub fn remote_target(remote_root: &str, relative: &Utf8Path) -> String {
    let mut target = remote_root.trim_end_matches('/').to_owned();
    for component in relative.components() {
        if let Utf8Component::Normal(part) = component {
            target.push('/');
            target.push_str(part);
        }
    }

    if target.is_empty() && remote_root.starts_with('/') {
        target.push('/');
    }
    target
}
