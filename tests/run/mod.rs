//! Step definitions and fixtures for the run scenarios.

mod bdd_steps;
mod scenarios;
mod test_helpers;
