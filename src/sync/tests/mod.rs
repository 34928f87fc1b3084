//! Unit tests for the sync module.
//!
//! The suite is split by concern: settings validation, synchroniser
//! arguments, remote execution, shell escaping, and the process runner.

mod escape;
