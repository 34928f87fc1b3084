//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::rc::Rc;

use crate::sync::{CommandRunner, CommandStatus, StdinMode, SyncError};

/// Scripted command runner that returns pre-seeded statuses in FIFO order.
///
/// Used to drive deterministic command outcomes without spawning processes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRunner {
    responses: Rc<RefCell<VecDeque<CommandStatus>>>,
    invocations: Rc<RefCell<Vec<CommandInvocation>>>,
}

/// Records a single invocation made through [`ScriptedRunner`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandInvocation {
    /// Program name as passed to the runner.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<OsString>,
    /// Standard input handling requested for the program.
    pub stdin: StdinMode,
}

impl CommandInvocation {
    /// Returns a shell-like command string for assertions.
    #[must_use]
    pub fn command_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(
            self.args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }

    /// Returns the arguments as UTF-8 strings.
    #[must_use]
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl ScriptedRunner {
    /// Creates a new runner with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.borrow().clone()
    }

    /// Returns the invocations whose program equals `program`.
    #[must_use]
    pub fn invocations_of(&self, program: &str) -> Vec<CommandInvocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|invocation| invocation.program == program)
            .cloned()
            .collect()
    }

    /// Pushes a successful exit status.
    pub fn push_success(&self) {
        self.push_exit_code(0);
    }

    /// Pushes a specific exit code.
    pub fn push_exit_code(&self, code: i32) {
        self.responses
            .borrow_mut()
            .push_back(CommandStatus { code: Some(code) });
    }

    /// Pushes a status with no exit code to simulate termination by signal.
    pub fn push_missing_exit_code(&self) {
        self.responses
            .borrow_mut()
            .push_back(CommandStatus { code: None });
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
        stdin: StdinMode,
    ) -> Result<CommandStatus, SyncError> {
        self.invocations.borrow_mut().push(CommandInvocation {
            program: program.to_owned(),
            args: args.to_vec(),
            stdin,
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| SyncError::Spawn {
                program: program.to_owned(),
                message: String::from("no scripted response available"),
            })
    }
}
