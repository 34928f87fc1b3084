//! Two-way `unison` synchronisation and remote command execution over
//! `ssh`, preserving remote exit codes.

use std::ffi::OsString;

use camino::Utf8Path;
use shell_escape::unix::escape;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::paths::remote_target;

mod config;
mod remote_command;
mod types;

pub use config::{
    DEFAULT_SSH_BIN, DEFAULT_UNISON_BIN, SyncConfig, SyncConfigLoadError, SyncError,
};
pub use remote_command::{build_remote_command, escape_argument};
pub use types::{
    CommandRunner, CommandStatus, ProcessCommandRunner, RemoteCommandOutput, StdinMode,
};

/// Fixed `unison` flags: batch mode without prompts, no log file, keep both
/// versions on conflict and prefer the newer one.
const UNISON_FLAGS: &[&str] = &[
    "-batch",
    "-silent",
    "-logfile=/dev/null",
    "-copyonconflict",
    "-prefer=newer",
];

/// Runs the synchroniser and the remote shell for a project.
#[derive(Clone, Debug)]
pub struct Syncer<R: CommandRunner> {
    config: SyncConfig,
    runner: R,
}

impl Syncer<ProcessCommandRunner> {
    /// Convenience constructor that wires the real process runner.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when validation fails.
    pub fn with_process_runner(config: SyncConfig) -> Result<Self, SyncError> {
        Self::new(config, ProcessCommandRunner)
    }
}

impl<R: CommandRunner> Syncer<R> {
    /// Creates a new syncer using the provided runner and settings.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] when settings validation fails.
    pub fn new(config: SyncConfig, runner: R) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    /// Synchronises the project root with its remote counterpart in both
    /// directions.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Spawn`] when `unison` cannot be started, or
    /// [`SyncError::CommandFailure`] carrying the full command line when it
    /// exits non-zero.
    pub fn sync(&self, project: &ProjectConfig) -> Result<(), SyncError> {
        let args = build_unison_args(project);
        let command = render_command_line(&self.config.unison_bin, &args);
        debug!(%command, "running synchroniser");

        let status = self
            .runner
            .run(&self.config.unison_bin, &args, StdinMode::Null)?;
        if status.is_success() {
            return Ok(());
        }

        let status_text = status
            .code
            .map_or_else(|| String::from("unknown"), |code| code.to_string());
        Err(SyncError::CommandFailure {
            command,
            status: status.code,
            status_text,
        })
    }

    /// Executes `command` over SSH inside the remote directory matching
    /// `relative`, returning the remote exit code untouched.
    ///
    /// # Errors
    ///
    /// Propagates any failure to spawn the SSH client from the configured
    /// [`CommandRunner`]. A non-zero remote exit is not an error.
    pub fn run_remote(
        &self,
        project: &ProjectConfig,
        relative: &Utf8Path,
        command: &[String],
    ) -> Result<RemoteCommandOutput, SyncError> {
        let remote_dir = remote_target(&project.remote_path, relative);
        let remote_command = build_remote_command(&remote_dir, command);
        let args = build_ssh_args(project, &remote_command);
        debug!(host = %project.remote_host, %remote_command, "running remote command");

        let status = self
            .runner
            .run(&self.config.ssh_bin, &args, StdinMode::Inherit)?;
        Ok(RemoteCommandOutput {
            exit_code: status.code,
        })
    }
}

fn build_unison_args(project: &ProjectConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = UNISON_FLAGS
        .iter()
        .map(|flag| OsString::from(*flag))
        .collect();

    let tagged = project
        .name_ignores
        .iter()
        .map(|pattern| ("Name", pattern))
        .chain(project.path_ignores.iter().map(|pattern| ("Path", pattern)));
    for (kind, pattern) in tagged {
        args.push(OsString::from("-ignore"));
        args.push(OsString::from(format!("{kind} {pattern}")));
    }

    args.push(OsString::from(project.root_directory.as_str()));
    args.push(OsString::from(format!(
        "ssh://{}/{}",
        project.remote_host, project.remote_path
    )));
    args
}

fn build_ssh_args(project: &ProjectConfig, remote_command: &str) -> Vec<OsString> {
    vec![
        OsString::from(&project.remote_host),
        OsString::from(remote_command),
    ]
}

fn render_command_line(program: &str, args: &[OsString]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(escape(program.into()).into_owned());
    parts.extend(
        args.iter()
            .map(|arg| escape(arg.to_string_lossy()).into_owned()),
    );
    parts.join(" ")
}

#[cfg(test)]
mod tests;
