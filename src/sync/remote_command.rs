//! Remote command string construction.
//!
//! The remote shell receives a single string, so the local argument vector
//! has to survive one round of POSIX shell parsing on the far side.

use shell_escape::unix::escape;

/// Quotes `arg` for a POSIX shell.
///
/// The argument is always wrapped in single quotes, and every embedded
/// single quote becomes `'\''` (close quote, escaped quote, reopen).
#[must_use]
pub fn escape_argument(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Builds `cd <remote_dir>; <args...>` for the remote shell.
///
/// An empty `command` still yields the `cd` prefix followed by an empty
/// command line.
#[must_use]
pub fn build_remote_command(remote_dir: &str, command: &[String]) -> String {
    let escaped_dir = escape(remote_dir.into());
    let rendered = command
        .iter()
        .map(|arg| escape_argument(arg))
        .collect::<Vec<_>>()
        .join(" ");
    format!("cd {escaped_dir}; {rendered}")
}
