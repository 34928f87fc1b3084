//! Shared fixtures for run BDD scenarios.

use camino::Utf8PathBuf;
use r::ProjectConfig;
use r::sync::{RemoteCommandOutput, SyncConfig};
use r::test_support::ScriptedRunner;
use rstest::fixture;

#[derive(Clone, Debug)]
pub struct RunContext {
    pub runner: ScriptedRunner,
    pub sync_config: SyncConfig,
    pub project: ProjectConfig,
    pub cwd: Utf8PathBuf,
    pub outcome: Option<RunResult>,
}

#[derive(Clone, Debug)]
pub enum RunResult {
    Success(RemoteCommandOutput),
    Failure(String),
}

#[fixture]
pub fn run_context() -> RunContext {
    RunContext {
        runner: ScriptedRunner::new(),
        sync_config: SyncConfig {
            unison_bin: String::from("unison"),
            ssh_bin: String::from("ssh"),
        },
        project: ProjectConfig {
            root_directory: Utf8PathBuf::from("/proj"),
            remote_host: String::from("host"),
            remote_path: String::from("/remote/proj"),
            name_ignores: Vec::new(),
            path_ignores: Vec::new(),
        },
        cwd: Utf8PathBuf::from("/proj"),
        outcome: None,
    }
}
