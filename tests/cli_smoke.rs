//! Behavioural smoke tests for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn cli_help_describes_the_tool() {
    let mut cmd = cargo_bin_cmd!("r");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(contains("--init"))
        .stdout(contains("COMMAND"));
}

#[test]
fn cli_rejects_init_combined_with_a_command() {
    let mut cmd = cargo_bin_cmd!("r");
    cmd.args(["--init", "make"]);

    cmd.assert().failure().stderr(contains("--init"));
}

#[test]
fn cli_long_help_documents_files_environment_and_exit_status() {
    let mut cmd = cargo_bin_cmd!("r");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(contains("r.toml"))
        .stdout(contains("R_UNISON_BIN"))
        .stdout(contains("1 when interrupted"));
}
