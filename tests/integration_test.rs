use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn result_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("trial_stats.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_only_results_left(dir: &Path) {
    let names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["trial_stats.txt".to_string()]);
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cpbench 0.1.0"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Copy Bench"));
}

#[test]
fn test_small_run_writes_six_trials() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("4")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--max-size-mb")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating file 0002MB.txt"))
        .stdout(predicate::str::contains("... 00004 byte(s) at a time... Took"))
        .stdout(predicate::str::starts_with(
            "Using Max RAM size of 4B for file generation/copying...\n",
        ))
        .stdout(predicate::str::contains("Invalid max RAM").not());

    let lines = result_lines(temp_dir.path());
    assert_eq!(lines.len(), 6);

    let line_format = predicate::str::is_match(r"^\d+ \d+ \d+\.\d{6}$").unwrap();
    for line in &lines {
        assert!(line_format.eval(line.as_str()), "bad line: {}", line);
    }
    let pairs: Vec<(String, String)> = lines
        .iter()
        .map(|l| {
            let mut fields = l.split(' ');
            (
                fields.next().unwrap().to_string(),
                fields.next().unwrap().to_string(),
            )
        })
        .collect();
    let expected: Vec<(String, String)> = [
        ("1", "1"),
        ("1", "2"),
        ("1", "4"),
        ("2", "1"),
        ("2", "2"),
        ("2", "4"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    assert_eq!(pairs, expected);

    assert_only_results_left(temp_dir.path());
}

#[test]
fn test_invalid_buffer_argument_falls_back_to_default() {
    for arg in ["abc", "0"] {
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = Command::cargo_bin("cpbench").unwrap();
        cmd.arg(arg)
            .arg("--dir")
            .arg(temp_dir.path())
            .arg("--max-size-mb")
            .arg("1")
            .assert()
            .success()
            .stdout(predicate::str::starts_with(format!(
                "Error! Invalid max RAM argument provided: {}. Defaulting to 1024.\n\
                 Using Max RAM size of 1024B for file generation/copying...\n",
                arg
            )))
            .stdout(predicate::str::contains("01024 byte(s) at a time"));

        let lines = result_lines(temp_dir.path());
        assert_eq!(lines.len(), 11);
        assert!(lines.last().unwrap().starts_with("1 1024 "));
    }
}

#[test]
fn test_missing_buffer_argument_uses_default_quietly() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("--dir")
        .arg(temp_dir.path())
        .arg("--max-size-mb")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Using Max RAM size of 1024B for file generation/copying...\n",
        ))
        .stdout(predicate::str::contains("Invalid max RAM").not());

    assert_eq!(result_lines(temp_dir.path()).len(), 11);
}

#[test]
fn test_work_dir_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.env("CPBENCH_DIR", temp_dir.path())
        .arg("1")
        .arg("--max-size-mb")
        .arg("1")
        .assert()
        .success();

    assert_eq!(result_lines(temp_dir.path()).len(), 1);
    assert_only_results_left(temp_dir.path());
}

#[test]
fn test_debug_log_flag() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = TempDir::new().unwrap();
    let log_path = log_dir.path().join("trace.log");
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("2")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--max-size-mb")
        .arg("1")
        .arg("--debug-log")
        .arg(&log_path)
        .assert()
        .success();

    let trace = fs::read_to_string(&log_path).unwrap();
    assert!(trace.contains("run start"));
    assert!(trace.contains("in 2-byte chunks"));
    assert!(trace.contains("run finished"));
}

#[test]
fn test_missing_entropy_source_reports_and_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("4")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--max-size-mb")
        .arg("1")
        .arg("--entropy-source")
        .arg(temp_dir.path().join("no-such-device"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not open entropy source"))
        .stdout(predicate::str::contains("Skipping 0001MB.txt"));

    assert!(!temp_dir.path().join("trial_stats.txt").exists());
}

#[test]
#[ignore] // Full 1..128 MB range with 1-byte chunks takes a long time
fn test_full_range_with_tiny_ceiling() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("cpbench").unwrap();
    cmd.arg("4").arg("--dir").arg(temp_dir.path()).assert().success();

    assert_eq!(result_lines(temp_dir.path()).len(), 24);
    assert_only_results_left(temp_dir.path());
}
