//! Core sync types and command runner abstraction.

use std::ffi::OsString;
use std::process::{Command, Stdio};

use crate::sync::SyncError;

/// How a child process receives standard input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StdinMode {
    /// Share the caller's standard input.
    Inherit,
    /// Connect standard input to the null device.
    Null,
}

/// Exit status of an external command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CommandStatus {
    /// Exit code reported by the process; `None` when it was killed by a
    /// signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    /// Returns `true` when the exit code equals zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Abstraction over command execution to support fakes in tests.
pub trait CommandRunner {
    /// Runs `program` with the given arguments, blocking until it exits.
    ///
    /// Standard output and error are shared with the caller so progress and
    /// remote output reach the user directly.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] if the command cannot be started.
    fn run(
        &self,
        program: &str,
        args: &[OsString],
        stdin: StdinMode,
    ) -> Result<CommandStatus, SyncError>;
}

/// Real command runner that shells out to the host operating system.
#[derive(Clone, Debug, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
        stdin: StdinMode,
    ) -> Result<CommandStatus, SyncError> {
        let stdio = match stdin {
            StdinMode::Inherit => Stdio::inherit(),
            StdinMode::Null => Stdio::null(),
        };
        let status = Command::new(program)
            .args(args)
            .stdin(stdio)
            .status()
            .map_err(|err| SyncError::Spawn {
                program: program.to_owned(),
                message: err.to_string(),
            })?;

        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// Outcome of a remote command executed over SSH.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RemoteCommandOutput {
    /// Exit code reported by the remote shell, forwarded verbatim.
    pub exit_code: Option<i32>,
}
