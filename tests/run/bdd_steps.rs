//! BDD step definitions for the `r` run workflow.

use camino::Utf8PathBuf;
use r::sync::Syncer;
use r::{RemoteSpec, RunOrchestrator, RunPlan};
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{RunContext, RunResult};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("setup failed: {0}")]
    Setup(String),
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a project rooted at \"{root}\" mirrored to \"{remote}\"")]
fn project_rooted_at(
    mut run_context: RunContext,
    root: String,
    remote: String,
) -> Result<RunContext, StepError> {
    let spec = RemoteSpec::parse(&remote).map_err(|err| StepError::Setup(err.to_string()))?;
    run_context.project.root_directory = Utf8PathBuf::from(root);
    run_context.project.remote_host = spec.host;
    run_context.project.remote_path = spec.path;
    Ok(run_context)
}

#[given("the working directory is \"{cwd}\"")]
fn working_directory(mut run_context: RunContext, cwd: String) -> RunContext {
    run_context.cwd = Utf8PathBuf::from(cwd);
    run_context
}

#[given("the first sync succeeds")]
fn first_sync_succeeds(run_context: RunContext) -> RunContext {
    run_context.runner.push_success();
    run_context
}

#[given("the first sync fails with status \"{code}\"")]
fn first_sync_fails(run_context: RunContext, code: i32) -> RunContext {
    run_context.runner.push_exit_code(code);
    run_context
}

#[given("the remote command exits with \"{code}\"")]
fn remote_exits(run_context: RunContext, code: i32) -> RunContext {
    run_context.runner.push_exit_code(code);
    run_context
}

#[given("the final sync succeeds")]
fn final_sync_succeeds(run_context: RunContext) -> RunContext {
    run_context.runner.push_success();
    run_context
}

#[given("the final sync fails with status \"{code}\"")]
fn final_sync_fails(run_context: RunContext, code: i32) -> RunContext {
    run_context.runner.push_exit_code(code);
    run_context
}

#[when("I run \"{command}\" remotely")]
fn run_remotely(run_context: RunContext, command: String) -> Result<RunContext, StepError> {
    let syncer = Syncer::new(run_context.sync_config.clone(), run_context.runner.clone())
        .map_err(|err| StepError::Setup(err.to_string()))?;
    let plan = RunPlan::new(run_context.project.clone(), &run_context.cwd)
        .map_err(|err| StepError::Setup(err.to_string()))?;
    let words: Vec<String> = command.split_whitespace().map(str::to_owned).collect();

    let outcome = match RunOrchestrator::new(syncer).execute(&plan, &words) {
        Ok(output) => RunResult::Success(output),
        Err(err) => RunResult::Failure(err.to_string()),
    };
    Ok(RunContext {
        outcome: Some(outcome),
        ..run_context
    })
}

#[then("the run result exit code is \"{code}\"")]
fn run_exit_code(run_context: &RunContext, code: i32) -> Result<(), StepError> {
    match &run_context.outcome {
        Some(RunResult::Success(output)) if output.exit_code == Some(code) => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected exit code {code}, got {other:?}"
        ))),
    }
}

#[then("the run fails mentioning \"{text}\"")]
fn run_fails(run_context: &RunContext, text: String) -> Result<(), StepError> {
    match &run_context.outcome {
        Some(RunResult::Failure(message)) if message.contains(&text) => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected failure mentioning {text:?}, got {other:?}"
        ))),
    }
}

#[then("the synchroniser ran \"{count}\" times")]
fn synchroniser_count(run_context: &RunContext, count: usize) -> Result<(), StepError> {
    let actual = run_context
        .runner
        .invocations_of(&run_context.sync_config.unison_bin)
        .len();
    if actual == count {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {count} sync runs, got {actual}"
        )))
    }
}

#[then("the remote command never ran")]
fn remote_never_ran(run_context: &RunContext) -> Result<(), StepError> {
    let ssh_runs = run_context
        .runner
        .invocations_of(&run_context.sync_config.ssh_bin);
    if ssh_runs.is_empty() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!("unexpected ssh runs: {ssh_runs:?}")))
    }
}

#[then("the remote command ran in \"{directory}\"")]
fn remote_directory(run_context: &RunContext, directory: String) -> Result<(), StepError> {
    let invocation = run_context
        .runner
        .invocations_of(&run_context.sync_config.ssh_bin)
        .pop()
        .ok_or_else(|| StepError::Assertion(String::from("missing ssh invocation")))?;
    let remote_command = invocation
        .arg_strings()
        .pop()
        .ok_or_else(|| StepError::Assertion(String::from("ssh invocation has no command")))?;
    let expected_prefix = format!("cd {directory}; ");
    if remote_command.starts_with(&expected_prefix) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {remote_command:?} to start with {expected_prefix:?}"
        )))
    }
}
