//! Core library for the `r` remote execution tool.
//!
//! `r` keeps a local working copy and a directory on a remote host in sync
//! with `unison`, runs a command remotely over `ssh` in the directory that
//! mirrors the local working directory, and synchronises again so remote
//! output comes back. The remote exit code is preserved so callers observe
//! the same status locally.

pub mod config;
pub mod init;
pub mod interrupt;
pub mod paths;
pub mod run;
pub mod sync;
pub mod test_support;

pub use config::{CONFIG_FILE_NAME, ConfigError, ProjectConfig, RemoteSpec, find_config_file};
pub use init::{InitError, InitWorkflow, Prompt, REMOTE_PROMPT, StdioPrompt};
pub use interrupt::{INTERRUPTED_MESSAGE, InterruptError, InterruptFlag, exit_on_interrupt};
pub use paths::{PathError, relative_path, remote_target};
pub use run::{RunError, RunOrchestrator, RunPlan, RunStage};
pub use sync::{
    CommandRunner, CommandStatus, ProcessCommandRunner, RemoteCommandOutput, StdinMode,
    SyncConfig, SyncConfigLoadError, SyncError, Syncer,
};
