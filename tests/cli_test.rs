//! Integration tests for the benchmark CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn benchmark() -> Command {
    let mut cmd = Command::cargo_bin("benchmark").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_cli_help() {
    benchmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--range"))
        .stdout(predicate::str::contains("--warm-up-runs"))
        .stdout(predicate::str::contains("--num-runs"))
        .stdout(predicate::str::contains("--function"));
}

#[test]
fn test_cli_list() {
    benchmark()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("dgemm"))
        .stdout(predicate::str::contains("dgesvd"));
}

#[test]
fn test_small_run_prints_one_line_per_size() {
    let output = benchmark()
        .args([
            "--function",
            "dgemm",
            "--range",
            "2:8:2",
            "--warm-up-runs",
            "0",
            "--num-runs",
            "2",
            "--seed",
            "3",
            "--no-progress",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    for (line, n) in lines.iter().zip([2, 4, 6, 8]) {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], n.to_string());
        let gflops: f64 = fields[2].parse().unwrap();
        assert!(gflops >= 0.0);
    }

    let stderr = String::from_utf8(output.stderr).unwrap();
    let csv_lines: Vec<&str> = stderr
        .lines()
        .filter(|l| l.split(',').count() == 3)
        .collect();
    assert_eq!(csv_lines.len(), 4);
    assert!(csv_lines[0].starts_with("2,"));
}

#[test]
fn test_unknown_kernel_fails() {
    benchmark()
        .args(["--function", "dfoo", "--range", "2:4:2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dfoo"));
}

#[test]
fn test_malformed_range_fails() {
    for range in ["1024", "1:2", "1:2:3:4", "a:b:c"] {
        benchmark()
            .args(["--function", "dgemm", "--range", range])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Illegal range input"));
    }
}

#[test]
fn test_zero_runs_fails() {
    benchmark()
        .args(["--range", "2:2:1", "--num-runs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of runs"));
}

#[test]
fn test_config_file_with_flag_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.json");
    fs::write(
        &path,
        r#"{ "function": "dpotrf", "range": "3:9:3", "num_runs": 1, "warm_up_runs": 0, "progress": false }"#,
    )
    .unwrap();

    let output = benchmark()
        .arg("--config")
        .arg(&path)
        .args(["--range", "4:4:1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("4\t"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempdir().unwrap();
    benchmark()
        .arg("--config")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[cfg(debug_assertions)]
#[test]
fn test_debug_build_warns_without_rust_log() {
    Command::cargo_bin("benchmark")
        .unwrap()
        .env_remove("RUST_LOG")
        .args([
            "--function",
            "dgemm",
            "--range",
            "2:2:1",
            "--num-runs",
            "1",
            "--warm-up-runs",
            "0",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Running a debug build"));
}

#[test]
fn test_failure_is_logged_and_reported() {
    Command::cargo_bin("benchmark")
        .unwrap()
        .env("RUST_LOG", "error")
        .args(["--function", "dfoo", "--range", "2:2:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Benchmark execution failed"))
        .stderr(predicate::str::contains(
            "Error: Sorry, the function 'dfoo' is not yet implemented",
        ));
}

#[test]
fn test_zero_start_or_step_exits_with_status_one() {
    for range in ["0:8:1", "1:8:0"] {
        benchmark()
            .args(["--range", range])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Illegal range input"));
    }
}
