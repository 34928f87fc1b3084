//! Binary entry point for the `r` CLI.

use std::io::{self, Write};
use std::process;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use r::{
    INTERRUPTED_MESSAGE, InitError, InitWorkflow, InterruptError, InterruptFlag, RunError,
    RunOrchestrator, RunPlan, StdioPrompt, SyncConfig, SyncError, Syncer, exit_on_interrupt,
};

mod cli;

use cli::Cli;

/// Exit status for interruptions, matching the remote convention of a
/// generic failure.
const INTERRUPTED_EXIT_CODE: i32 = 1;
/// Exit status for every other local error, kept apart from interruptions.
const ERROR_EXIT_CODE: i32 = 2;

/// Environment variable holding the log filter directives.
const LOG_ENV_VAR: &str = "R_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to determine the current directory: {0}")]
    WorkingDirectory(String),
    #[error("failed to load tool settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Interrupt(#[from] InterruptError),
    #[error("remote command terminated without an exit status")]
    MissingExitCode,
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            exit_code_for(&err)
        }
    };

    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn dispatch(cli: Cli) -> Result<i32, CliError> {
    if cli.init {
        run_init()?;
        return Ok(0);
    }
    run_command(&cli.command)
}

fn run_init() -> Result<(), CliError> {
    exit_on_interrupt(INTERRUPTED_EXIT_CODE)?;
    let cwd = current_dir()?;
    let path = InitWorkflow::new(cwd).execute(&mut StdioPrompt::from_stdio())?;
    writeln!(io::stderr(), "r: saved configuration to {path}").ok();
    Ok(())
}

fn run_command(command: &[String]) -> Result<i32, CliError> {
    let interrupt = InterruptFlag::install()?;
    let cwd = current_dir()?;
    let plan = RunPlan::discover(&cwd)?;

    let sync_config =
        SyncConfig::load_without_cli_args().map_err(|err| CliError::Settings(err.to_string()))?;
    let syncer = Syncer::with_process_runner(sync_config)?;
    let output = RunOrchestrator::new(syncer)
        .with_interrupt(interrupt)
        .execute(&plan, command)?;

    output.exit_code.ok_or(CliError::MissingExitCode)
}

fn current_dir() -> Result<Utf8PathBuf, CliError> {
    let cwd = std::env::current_dir().map_err(|err| CliError::WorkingDirectory(err.to_string()))?;
    let utf8 = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| CliError::WorkingDirectory(format!("{} is not UTF-8", path.display())))?;
    utf8.canonicalize_utf8()
        .map_err(|err| CliError::WorkingDirectory(err.to_string()))
}

const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Run(RunError::Interrupted { .. }) => INTERRUPTED_EXIT_CODE,
        _ => ERROR_EXIT_CODE,
    }
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    match err {
        CliError::Run(RunError::Interrupted { .. }) => {
            writeln!(target, "{INTERRUPTED_MESSAGE}").ok();
        }
        _ => {
            writeln!(target, "r: error: {err}").ok();
        }
    }
}
