//! End-to-end tests for the pq binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a config file so tests never pick up the user's own config
fn config_file(dir: &TempDir, interval_ms: u64) -> std::path::PathBuf {
    let path = dir.path().join("pacedqueue.yml");
    std::fs::write(&path, format!("queue:\n  interval_ms: {}\nshell: sh\n", interval_ms)).unwrap();
    path
}

fn pq(dir: &TempDir, interval_ms: u64) -> Command {
    let mut cmd = Command::cargo_bin("pq").unwrap();
    cmd.env("NO_COLOR", "1")
        .current_dir(dir.path())
        .arg("--config")
        .arg(config_file(dir, interval_ms));
    cmd
}

#[test]
fn test_run_prints_results_in_order() {
    let dir = TempDir::new().unwrap();
    pq(&dir, 0)
        .args(["run", "echo first", "echo second", "echo third"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)first.*second.*third").unwrap())
        .stdout(predicate::str::contains("3 commands completed"));
}

#[test]
fn test_failing_command_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    pq(&dir, 0)
        .args(["run", "exit 7", "echo after"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("status 7"))
        .stdout(predicate::str::contains("after"))
        .stderr(predicate::str::contains("1 of 2 commands failed"));
}

#[test]
fn test_run_reads_commands_from_stdin() {
    let dir = TempDir::new().unwrap();
    pq(&dir, 0)
        .arg("run")
        .write_stdin("echo from-stdin\n\n   \necho again\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)from-stdin.*again").unwrap())
        .stdout(predicate::str::contains("2 commands completed"));
}

#[test]
fn test_interval_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let started = std::time::Instant::now();
    pq(&dir, 60_000)
        .args(["run", "--interval-ms", "0", "true", "true"])
        .assert()
        .success();
    assert!(started.elapsed() < std::time::Duration::from_secs(30));
}

#[test]
fn test_run_is_paced() {
    let dir = TempDir::new().unwrap();
    let started = std::time::Instant::now();
    pq(&dir, 300).args(["run", "true", "true", "true"]).assert().success();
    // Third command starts no earlier than two intervals in
    assert!(started.elapsed() >= std::time::Duration::from_millis(600));
}

#[test]
fn test_config_prints_effective_config() {
    let dir = TempDir::new().unwrap();
    pq(&dir, 125)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("interval_ms: 125"))
        .stdout(predicate::str::contains("shell: sh"));
}

#[test]
fn test_no_commands() {
    let dir = TempDir::new().unwrap();
    pq(&dir, 0)
        .arg("run")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No commands to run"));
}
