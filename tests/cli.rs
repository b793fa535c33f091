//! CLI test cases.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

/// Create a new `Command` with our binary.
fn cmd() -> Command {
    Command::cargo_bin("ocr-text-assembler").unwrap()
}

#[test]
fn test_help() {
    cmd().arg("--help").assert().success();
}

#[test]
fn test_version() {
    cmd().arg("--version").assert().success();
}

#[test]
fn test_assemble_jsonl() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/scenario.jsonl")
        .assert()
        .success()
        .stdout("First\nSecond\nThird Fourth\n");
}

#[test]
fn test_assemble_rotated_csv() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/rotated.csv")
        .assert()
        .success()
        .stdout("First First 1\nSecond Second 2\nThird Third 3\nFourth Fourth 4\n");
}

#[test]
fn test_assemble_orders_pages_and_drops_empty_boxes() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/pages.json")
        .assert()
        .success()
        .stdout("one\ntwo\nthree\n")
        .stderr(predicate::str::contains("Dropping fragment"));
}

#[test]
fn test_assemble_stdin() {
    let input = fs::read_to_string("tests/fixtures/scenario.jsonl").unwrap();
    cmd()
        .arg("assemble")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("First\nSecond\nThird Fourth\n");
}

#[test]
fn test_assemble_csv_with_blank_orientation() {
    cmd()
        .arg("assemble")
        .write_stdin("page,text,left,bottom,width,height,orientation\n1,hi,0,0,10,10,\n")
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn test_assemble_rejects_huge_word_gap() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/scenario.jsonl")
        .args(["--word-gap", "1e300"])
        .assert()
        .failure();
}

#[test]
fn test_assemble_multiple_inputs_keeps_order() {
    cmd()
        .arg("assemble")
        .args(["--jobs", "2"])
        .arg("tests/fixtures/pages.json")
        .arg("tests/fixtures/scenario.jsonl")
        .assert()
        .success()
        .stdout("one\ntwo\nthree\nFirst\nSecond\nThird Fourth\n");
}

#[test]
fn test_assemble_jsonl_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pages.jsonl");
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/pages.json")
        .args(["--format", "jsonl"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let output = fs::read_to_string(&out).unwrap();
    let pages = output
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0]["page"], 1);
    assert_eq!(pages[0]["text"], "one\n");
    assert_eq!(pages[2]["path"], "tests/fixtures/pages.json");
}

#[test]
fn test_assemble_with_params_file() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/staggered.jsonl")
        .assert()
        .success()
        .stdout("high\nlow\n");
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/staggered.jsonl")
        .args(["--params", "tests/fixtures/loose.toml"])
        .assert()
        .success()
        .stdout("low high\n");
}

#[test]
fn test_assemble_flags_override_params_file() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/staggered.jsonl")
        .args(["--params", "tests/fixtures/loose.toml"])
        .args(["--line-overlap", "0.7"])
        .assert()
        .success()
        .stdout("high\nlow\n");
}

#[test]
fn test_assemble_rejects_bad_orientation() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/bad_orientation.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("orientation"));
}

#[test]
fn test_assemble_missing_file() {
    cmd()
        .arg("assemble")
        .arg("tests/fixtures/does_not_exist.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does_not_exist.jsonl"));
}

#[test]
fn test_schema() {
    for schema_type in ["FragmentRecord", "PageText"] {
        cmd()
            .arg("schema")
            .arg(schema_type)
            .assert()
            .success()
            .stdout(predicate::str::contains(schema_type));
    }
}
