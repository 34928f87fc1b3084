//! Command-line interface definitions for the `r` binary.
//!
//! The parser lives in its own module so the build script can reuse it when
//! generating the manual page.

use clap::Parser;

const AFTER_LONG_HELP: &str = "\
FILES:
  r.toml  Nearest file in the current directory or a parent. Holds
          remote = \"<host>:<absolute-path>\" and an optional ignores list;
          entries starting with / match paths from the project root, others
          match file and directory names.

ENVIRONMENT:
  R_UNISON_BIN  unison executable (default: unison)
  R_SSH_BIN     ssh executable (default: ssh)
  R_LOG         log filter for diagnostics on stderr (default: warn)

EXIT STATUS:
  The remote command's status once both syncs succeed, 1 when interrupted,
  2 on any other error.";

/// Top-level CLI for the `r` binary.
#[derive(Debug, Parser)]
#[command(
    name = "r",
    version,
    about = "Sync the enclosing project with a remote host, run a command there, and sync back",
    after_long_help = AFTER_LONG_HELP
)]
pub(crate) struct Cli {
    /// Create an `r.toml` in the current directory, prompting for the remote
    /// address.
    #[arg(long, conflicts_with = "command")]
    pub(crate) init: bool,
    /// Command to execute with the remote shell (use -- before leading flags).
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub(crate) command: Vec<String>,
}
