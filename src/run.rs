//! Orchestrates a synchronise → execute → synchronise run.
//!
//! A run moves through [`RunStage::Idle`], [`RunStage::PreSync`],
//! [`RunStage::Executing`], [`RunStage::PostSync`] and [`RunStage::Done`].
//! A failed first sync stops the run before anything executes remotely. The
//! second sync always runs once the remote command has finished, whatever
//! its status, so partial output still comes back; a failure there replaces
//! the remote status because the local tree may be out of date.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, ProjectConfig};
use crate::interrupt::InterruptFlag;
use crate::paths::{PathError, relative_path, remote_target};
use crate::sync::{CommandRunner, RemoteCommandOutput, SyncError, Syncer};

/// Stages of a remote run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunStage {
    /// Configuration is being loaded; nothing has run yet.
    Idle,
    /// First synchronisation, pushing local edits.
    PreSync,
    /// Remote command execution.
    Executing,
    /// Second synchronisation, pulling remote changes back.
    PostSync,
    /// The run has finished.
    Done,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::PreSync => "pre-sync",
            Self::Executing => "remote execution",
            Self::PostSync => "post-sync",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

/// Errors surfaced while performing a remote run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Raised when `r.toml` cannot be located or loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Raised when the working directory lies outside the project.
    #[error(transparent)]
    Usage(#[from] PathError),
    /// Raised when either synchronisation step fails.
    #[error("{stage} failed: {source}")]
    Sync {
        /// Stage in which the synchroniser failed.
        stage: RunStage,
        /// Underlying synchronisation error.
        #[source]
        source: SyncError,
    },
    /// Raised when the remote shell cannot be started.
    #[error("remote command failed to start: {0}")]
    Remote(#[source] SyncError),
    /// Raised when the user interrupts a blocking stage.
    #[error("interrupted during {stage}")]
    Interrupted {
        /// Stage that was running when the interrupt arrived.
        stage: RunStage,
    },
}

/// Project configuration paired with the working directory's place in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunPlan {
    /// Loaded project configuration.
    pub project: ProjectConfig,
    /// Working directory relative to the project root.
    pub relative_path: Utf8PathBuf,
}

impl RunPlan {
    /// Loads the configuration nearest to `cwd` and maps `cwd` into it.
    ///
    /// `cwd` should be canonical so the project root and the working
    /// directory share the same prefix.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] when no valid `r.toml` is found, or
    /// [`RunError::Usage`] when `cwd` is outside the project.
    pub fn discover(cwd: &Utf8Path) -> Result<Self, RunError> {
        let project = ProjectConfig::discover(cwd)?;
        Self::new(project, cwd)
    }

    /// Maps `cwd` into an already loaded project.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Usage`] when `cwd` is outside the project.
    pub fn new(project: ProjectConfig, cwd: &Utf8Path) -> Result<Self, RunError> {
        let relative_path = relative_path(cwd, &project.root_directory)?;
        Ok(Self {
            project,
            relative_path,
        })
    }

    /// Returns the remote directory the command runs in.
    #[must_use]
    pub fn remote_directory(&self) -> String {
        remote_target(&self.project.remote_path, &self.relative_path)
    }
}

/// Executes the run sequence with the provided syncer.
#[derive(Debug)]
pub struct RunOrchestrator<R: CommandRunner> {
    syncer: Syncer<R>,
    interrupt: InterruptFlag,
}

impl<R: CommandRunner> RunOrchestrator<R> {
    /// Creates a new orchestrator with an interrupt flag nobody raises.
    #[must_use]
    pub fn new(syncer: Syncer<R>) -> Self {
        Self {
            syncer,
            interrupt: InterruptFlag::new(),
        }
    }

    /// Checks `interrupt` after every blocking stage.
    #[must_use]
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Runs the full sequence and returns the remote command's status.
    ///
    /// A non-zero remote exit code is returned as data, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Sync`] when either sync fails,
    /// [`RunError::Remote`] when SSH cannot be started, or
    /// [`RunError::Interrupted`] when the user interrupts a stage.
    pub fn execute(
        &self,
        plan: &RunPlan,
        command: &[String],
    ) -> Result<RemoteCommandOutput, RunError> {
        self.sync_stage(plan, RunStage::PreSync)?;

        info!(
            stage = %RunStage::Executing,
            directory = %plan.remote_directory(),
            "entering stage"
        );
        let result = self
            .syncer
            .run_remote(&plan.project, &plan.relative_path, command);
        self.check_interrupt(RunStage::Executing)?;
        let output = result.map_err(RunError::Remote)?;

        self.sync_stage(plan, RunStage::PostSync)?;

        info!(stage = %RunStage::Done, exit_code = ?output.exit_code, "run finished");
        Ok(output)
    }

    fn sync_stage(&self, plan: &RunPlan, stage: RunStage) -> Result<(), RunError> {
        info!(%stage, root = %plan.project.root_directory, "entering stage");
        let result = self.syncer.sync(&plan.project);
        self.check_interrupt(stage)?;
        result.map_err(|source| RunError::Sync { stage, source })
    }

    fn check_interrupt(&self, stage: RunStage) -> Result<(), RunError> {
        if self.interrupt.is_raised() {
            return Err(RunError::Interrupted { stage });
        }
        Ok(())
    }
}
