//! Tests for POSIX shell quoting of remote arguments.

use super::super::*;
use rstest::rstest;
use std::ffi::OsString;
use std::process::Command;

#[rstest]
#[case("argument", "'argument'")]
#[case("it's", r"'it'\''s'")]
#[case("", "''")]
#[case("'", r"''\'''")]
#[case("$HOME; rm -rf /", "'$HOME; rm -rf /'")]
fn escape_argument_wraps_in_single_quotes(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(escape_argument(raw), expected);
}

#[test]
fn build_remote_command_joins_escaped_arguments() {
    let command = vec![String::from("echo"), String::from("a b"), String::from("c'd")];

    assert_eq!(
        build_remote_command("/remote/proj", &command),
        r"cd /remote/proj; 'echo' 'a b' 'c'\''d'"
    );
}

#[test]
fn build_remote_command_with_no_arguments_keeps_trailing_separator() {
    assert_eq!(build_remote_command("/remote/proj", &[]), "cd /remote/proj; ");
}

/// Evaluates the escaped vector with `sh` and returns the words it produced.
fn shell_words(args: &[&str]) -> Vec<String> {
    let rendered = args
        .iter()
        .map(|arg| escape_argument(arg))
        .collect::<Vec<_>>()
        .join(" ");
    let script = format!("printf '%s\\0' {rendered}");
    let output = Command::new("sh")
        .args([OsString::from("-c"), OsString::from(script)])
        .output()
        .expect("sh should run");
    assert!(output.status.success(), "sh failed: {output:?}");

    let stdout = String::from_utf8(output.stdout).expect("utf8 output");
    let mut words: Vec<String> = stdout.split('\0').map(str::to_owned).collect();
    words.pop();
    words
}

#[rstest]
#[case(&["echo", "hello world"])]
#[case(&["", "''", "'"])]
#[case(&["a'b'c", "\"double\"", "back\\slash"])]
#[case(&["$(whoami)", "`id`", "*", "~", "a;b|c&d"])]
#[case(&["line\nbreak", "tab\there"])]
fn escaped_arguments_round_trip_through_a_posix_shell(#[case] args: &[&str]) {
    assert_eq!(shell_words(args), args);
}
