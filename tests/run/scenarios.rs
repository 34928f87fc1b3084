//! BDD scenarios for the run workflow.

use rstest_bdd_macros::scenario;

use super::test_helpers::{RunContext, run_context};

#[scenario(path = "tests/features/run.feature", name = "Propagate remote exit codes")]
fn scenario_propagate_exit_codes(run_context: RunContext) {
    let _ = run_context;
}

#[scenario(
    path = "tests/features/run.feature",
    name = "Abort before executing when the first sync fails"
)]
fn scenario_abort_on_first_sync_failure(run_context: RunContext) {
    let _ = run_context;
}

#[scenario(
    path = "tests/features/run.feature",
    name = "A failed final sync replaces the remote status"
)]
fn scenario_final_sync_failure_overrides(run_context: RunContext) {
    let _ = run_context;
}
