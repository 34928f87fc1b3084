//! Ctrl-C capture for the blocking stages of a run.
//!
//! Child processes share the terminal's process group, so they receive the
//! interrupt themselves and exit. The handler only records that it fired;
//! the orchestrator checks the flag once the blocking child returns.

use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// Report printed when the user interrupts the tool.
pub const INTERRUPTED_MESSAGE: &str = "r: operation interrupted";

/// Errors raised while installing the interrupt handler.
#[derive(Debug, Error)]
pub enum InterruptError {
    /// Raised when the process-wide handler cannot be registered.
    #[error("failed to install interrupt handler: {0}")]
    Install(#[from] ctrlc::Error),
}

/// Shared flag raised when the user interrupts the tool.
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// Creates a flag that is not wired to any signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag raised by the process-wide Ctrl-C handler.
    ///
    /// # Errors
    ///
    /// Returns [`InterruptError::Install`] when a handler is already
    /// registered or the platform refuses one.
    pub fn install() -> Result<Self, InterruptError> {
        let flag = Self::new();
        let handle = flag.clone();
        ctrlc::set_handler(move || handle.raise())?;
        Ok(flag)
    }

    /// Marks the run as interrupted.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once an interrupt has been received.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

/// Installs a Ctrl-C handler that prints [`INTERRUPTED_MESSAGE`] and ends
/// the process with `exit_code`.
///
/// For stages blocked on terminal input: no child receives the signal, so
/// nothing returns to check an [`InterruptFlag`].
///
/// # Errors
///
/// Returns [`InterruptError::Install`] when a handler is already registered
/// or the platform refuses one.
pub fn exit_on_interrupt(exit_code: i32) -> Result<(), InterruptError> {
    ctrlc::set_handler(move || {
        writeln!(io::stderr(), "{INTERRUPTED_MESSAGE}").ok();
        process::exit(exit_code);
    })?;
    Ok(())
}
