//! Integration tests for the shingler binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/tiny_corpus.txt";

fn shingler() -> Command {
    Command::cargo_bin("shingler").unwrap()
}

fn small_run(cmd: &mut Command, output: &std::path::Path) {
    cmd.arg("--corpus")
        .arg(FIXTURE)
        .arg("--output")
        .arg(output)
        .arg("--window-size")
        .arg("8")
        .arg("--paa-size")
        .arg("4")
        .arg("--alphabet-size")
        .arg("3")
        .arg("--shingle-length")
        .arg("2")
        .arg("--mutants")
        .arg("5");
}

#[test]
fn test_writes_matrix() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("matrix.csv");

    let mut cmd = shingler();
    small_run(&mut cmd, &out);
    cmd.assert().success();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("aa,ab,ac,ba,bb,bc,ca,cb,cc,key"));
    assert_eq!(lines.count(), 20);
}

#[test]
fn test_summary_json() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("matrix.csv");

    let mut cmd = shingler();
    small_run(&mut cmd, &out);
    cmd.arg("--summary");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["mutants"], 20);
    assert_eq!(summary["columns"], 9);
    assert_eq!(summary["series"], 4);
    assert_eq!(summary["mutants_per_class"]["1"], 10);
}

#[test]
fn test_repeated_runs_identical() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let mut cmd = shingler();
    small_run(&mut cmd, &first);
    cmd.assert().success();

    let mut cmd = shingler();
    small_run(&mut cmd, &second);
    cmd.assert().success();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_missing_corpus_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("matrix.csv");

    shingler()
        .arg("--corpus")
        .arg(dir.path().join("CBF_TRAIN"))
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CBF_TRAIN"));

    assert!(!out.exists());
}

#[test]
fn test_invalid_config_fails_before_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("matrix.csv");
    fs::write(&out, "previous").unwrap();

    shingler()
        .arg("--corpus")
        .arg(FIXTURE)
        .arg("--output")
        .arg(&out)
        .arg("--shingle-length")
        .arg("9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("shingle_length"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
}

#[test]
fn test_series_shorter_than_window_leaves_output_untouched() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("matrix.csv");
    fs::write(&out, "previous").unwrap();

    // Fixture series have 16 points; the default window is 60
    shingler()
        .arg("--corpus")
        .arg(FIXTURE)
        .arg("--output")
        .arg(&out)
        .arg("--mutants")
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1_0"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("from_config.csv");
    let config = dir.path().join("shingler.toml");
    fs::write(
        &config,
        format!(
            "window_size = 8\npaa_size = 4\nalphabet_size = 2\nshingle_length = 3\nmutants_per_series = 2\noutput = {:?}\n",
            out.to_str().unwrap()
        ),
    )
    .unwrap();

    shingler()
        .arg("--corpus")
        .arg(FIXTURE)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("aaa,aab,aba,abb,baa,bab,bba,bbb,key\n"));
    assert_eq!(text.lines().count(), 1 + 4 * 2);
}

#[test]
fn test_help_mentions_corpus() {
    shingler()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--corpus"));
}
