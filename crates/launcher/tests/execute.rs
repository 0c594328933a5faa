//! Launching real child processes through `/bin/sh`.
//!
//! A small shell script stands in for rsync so the tests can observe the
//! arguments it received, its output streams and its exit code.

#![cfg(unix)]

use std::path::Path;

use launcher::{LaunchError, Launcher};
use options::{Environment, HostPlatform, RsyncOptions};
use test_support::{RecordingSink, ScriptDir};

fn script_options(dir: &ScriptDir, body: &str) -> RsyncOptions {
    let script = dir.script("fake-rsync", body).expect("write script");
    let mut options = RsyncOptions::new();
    options
        .platform(HostPlatform::Posix)
        .executable(format!("/bin/sh {}", script.display()));
    options
}

#[tokio::test]
async fn zero_exit_resolves_with_command() {
    let dir = ScriptDir::new().expect("tempdir");
    let mut options = script_options(&dir, "exit 0");
    options.flags("av").source("a").destination("b");
    let launcher = Launcher::from(options);

    let success = launcher.execute(None, None).await.expect("success");

    assert_eq!(success.code(), 0);
    assert_eq!(success.cmd(), launcher.command());
    assert!(success.cmd().ends_with(" -av a b"));
}

#[tokio::test]
async fn non_zero_exit_rejects_with_code_and_command() {
    let dir = ScriptDir::new().expect("tempdir");
    let mut options = script_options(&dir, "exit 23");
    options.source("a").destination("b");
    let launcher = Launcher::from(options);

    let error = launcher.execute(None, None).await.unwrap_err();

    assert_eq!(error.code(), Some(23));
    assert_eq!(error.cmd(), Some(launcher.command().as_str()));
    assert_eq!(error.to_string(), "rsync exited with code 23");
}

#[tokio::test]
async fn missing_shell_is_a_spawn_failure() {
    let mut options = RsyncOptions::new();
    options
        .platform(HostPlatform::Posix)
        .executable_shell("/nonexistent/shell")
        .source("a");
    let launcher = Launcher::from(options);

    let error = launcher.execute(None, None).await.unwrap_err();

    assert!(matches!(error, LaunchError::Spawn(_)));
    assert!(error.is_not_found());
    assert_eq!(error.cmd(), None);
}

#[tokio::test]
async fn missing_executable_surfaces_as_shell_exit_code() {
    let mut options = RsyncOptions::new();
    options
        .platform(HostPlatform::Posix)
        .executable("/nonexistent/rsync")
        .source("a");
    let launcher = Launcher::from(options);

    assert!(!launcher.executable_available());
    let error = launcher.execute(None, None).await.unwrap_err();

    assert_eq!(error.code(), Some(127));
}

#[tokio::test]
async fn escaped_operands_reach_the_child_intact() {
    let dir = ScriptDir::new().expect("tempdir");
    let mut options = script_options(&dir, r#"printf '%s\n' "$@""#);
    options
        .set("rsh", "ssh -p 2222")
        .exclude("My Docs/*")
        .source("some file.txt")
        .source("a_quoted'filename\".txt")
        .destination("$HOME/(backup)");
    let stdout = RecordingSink::new();

    Launcher::from(options)
        .execute(Some(stdout.sink()), None)
        .await
        .expect("success");

    assert_eq!(
        stdout.text(),
        "--rsh=ssh -p 2222\n--exclude=My Docs/*\nsome file.txt\na_quoted'filename\".txt\n$HOME/(backup)\n"
    );
}

#[tokio::test]
async fn stdout_and_stderr_reach_their_own_sinks() {
    let dir = ScriptDir::new().expect("tempdir");
    let options = script_options(&dir, "printf 'sent 12 bytes\\n'; printf 'warning\\n' >&2");
    let stdout = RecordingSink::new();
    let stderr = RecordingSink::new();

    Launcher::from(options)
        .execute(Some(stdout.sink()), Some(stderr.sink()))
        .await
        .expect("success");

    assert_eq!(stdout.text(), "sent 12 bytes\n");
    assert_eq!(stderr.text(), "warning\n");
}

#[tokio::test]
async fn per_call_sinks_override_configured_ones() {
    let dir = ScriptDir::new().expect("tempdir");
    let configured_out = RecordingSink::new();
    let configured_err = RecordingSink::new();
    let per_call_out = RecordingSink::new();
    let mut options = script_options(&dir, "echo out; echo err >&2");
    options.output(Some(configured_out.sink()), Some(configured_err.sink()));

    Launcher::from(options)
        .execute(Some(per_call_out.sink()), None)
        .await
        .expect("success");

    assert_eq!(per_call_out.text(), "out\n");
    assert_eq!(configured_out.chunk_count(), 0);
    assert_eq!(configured_err.text(), "err\n");
}

#[tokio::test]
async fn output_is_delivered_on_failure_too() {
    let dir = ScriptDir::new().expect("tempdir");
    let options = script_options(&dir, "echo 'rsync error: some files could not be transferred' >&2; exit 23");
    let stderr = RecordingSink::new();

    let error = Launcher::from(options)
        .execute(None, Some(stderr.sink()))
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some(23));
    assert!(stderr.text().contains("some files could not be transferred"));
}

#[tokio::test]
async fn large_output_arrives_complete_and_in_order() {
    let dir = ScriptDir::new().expect("tempdir");
    let options = script_options(&dir, "i=0; while [ $i -lt 5000 ]; do echo \"line $i\"; i=$((i+1)); done");
    let stdout = RecordingSink::new();

    Launcher::from(options)
        .execute(Some(stdout.sink()), None)
        .await
        .expect("success");

    let expected: String = (0..5000).map(|i| format!("line {i}\n")).collect();
    assert_eq!(stdout.text(), expected);
    assert!(stdout.chunk_count() >= 1);
}

#[tokio::test]
async fn unobserved_output_is_drained() {
    let dir = ScriptDir::new().expect("tempdir");
    let options = script_options(&dir, "dd if=/dev/zero bs=1024 count=512 2>/dev/null; exit 0");

    let success = Launcher::from(options).execute(None, None).await.expect("success");

    assert_eq!(success.code(), 0);
}

#[tokio::test]
async fn working_directory_and_environment_are_applied() {
    let dir = ScriptDir::new().expect("tempdir");
    let workdir = tempfile::tempdir().expect("tempdir");
    let mut options = script_options(&dir, "pwd; printf '%s|%s\\n' \"$GREETING\" \"${HOME-unset}\"");
    options
        .cwd(workdir.path())
        .env([("GREETING", "hello")].into_iter().collect::<Environment>());
    let stdout = RecordingSink::new();

    Launcher::from(options)
        .execute(Some(stdout.sink()), None)
        .await
        .expect("success");

    let text = stdout.text();
    let mut lines = text.lines();
    let reported = lines.next().expect("pwd line");
    assert_eq!(
        Path::new(reported).canonicalize().expect("canonical pwd"),
        workdir.path().canonicalize().expect("canonical workdir")
    );
    assert_eq!(lines.next(), Some("hello|unset"));
}

#[tokio::test]
async fn repeated_execution_spawns_a_new_child_each_time() {
    let dir = ScriptDir::new().expect("tempdir");
    let counter = dir.path().join("count");
    let body = format!("echo run >> '{}'", counter.display());
    let launcher = Launcher::from(script_options(&dir, &body));

    launcher.execute(None, None).await.expect("first run");
    launcher.execute(None, None).await.expect("second run");

    let runs = std::fs::read_to_string(counter).expect("counter file");
    assert_eq!(runs.lines().count(), 2);
}
