use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("pensia").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn read_report(dir: &TempDir, name: &str) -> String {
    let bytes = fs::read(dir.path().join(name)).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "missing BOM");
    String::from_utf8(bytes[3..].to_vec()).unwrap()
}

#[test]
fn clean_file_gets_header_only_report() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture("clean.json"))
        .arg("--out")
        .arg(out.path())
        .assert()
        .success();

    assert_eq!(read_report(&out, "clean.csv"), "path in file,serial number,problem\r\n");
}

#[test]
fn problems_are_written_in_order() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture("problems.yaml"))
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .success();

    let report = read_report(&out, "problems.csv");
    let lines: Vec<&str> = report.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("/PirteiTaktziv,0,Net last contribution"));
    assert!(lines[1].ends_with("(1973 != 2083 - 10 - 0)"));
    assert!(lines[2].ends_with("(2024-02-15 > 2024-01-31)"));
}

#[test]
fn skipped_checker_is_not_reported() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture("problems.yaml"))
        .args(["--skip", "net-gross", "--out", out.path().to_str().unwrap()])
        .assert()
        .success();

    let report = read_report(&out, "problems.csv");
    assert!(!report.contains("Net last contribution"));
    assert!(report.contains("Valuation date"));
}

#[test]
fn json_format_writes_report() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture("problems.yaml"))
        .args(["--format", "json", "--out", out.path().to_str().unwrap()])
        .assert()
        .success();

    let text = fs::read_to_string(out.path().join("problems.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["problems"].as_array().unwrap().len(), 2);
    assert_eq!(json["checkers_run"].as_array().unwrap().len(), 8);
}

#[test]
fn directory_input_checks_supported_files() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::copy(fixture("clean.json"), input.path().join("a.json")).unwrap();
    fs::copy(fixture("problems.yaml"), input.path().join("b.yaml")).unwrap();
    fs::write(input.path().join("notes.txt"), "not a filing").unwrap();

    cmd()
        .arg(input.path())
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(out.path().join("a.csv").exists());
    assert!(out.path().join("b.csv").exists());
    assert!(!out.path().join("notes.csv").exists());
}

#[test]
fn failing_file_is_skipped_and_batch_continues() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(input.path().join("a.json"), "{ not json").unwrap();
    fs::copy(fixture("clean.json"), input.path().join("b.json")).unwrap();

    cmd()
        .arg(input.path())
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(contains("Failed to check file"));

    assert!(!out.path().join("a.csv").exists());
    assert!(out.path().join("b.csv").exists());
}

#[test]
fn schema_violation_is_logged_unless_disabled() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let text = fs::read_to_string(fixture("clean.json"))
        .unwrap()
        .replace("\"20100101\"", "\"2010-01-01\"");
    fs::write(input.path().join("bad.json"), text).unwrap();

    cmd()
        .arg(input.path().join("bad.json"))
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(contains("filing schema"));
    assert!(!out.path().join("bad.csv").exists());

    cmd()
        .arg(input.path().join("bad.json"))
        .args(["--no-schema", "--out", out.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(contains("Invalid 'TAARICH-HITZTARFUT-MUTZAR'"));
    assert!(!out.path().join("bad.csv").exists());
}

#[test]
fn unsupported_explicit_file_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg("filing.xml")
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("is not a JSON or YAML file"));
}

#[test]
fn out_must_be_a_directory() {
    cmd()
        .arg(fixture("clean.json"))
        .args(["--out", "/nonexistent/reports"])
        .assert()
        .failure()
        .stderr(contains("is not a directory"));
}

#[test]
fn unknown_skip_name_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture("clean.json"))
        .args(["--skip", "no-such-rule", "--out", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Unknown checker"));
}

#[test]
fn list_checkers() {
    cmd()
        .arg("--list-checkers")
        .assert()
        .success()
        .stdout(contains("last-contribution"))
        .stdout(contains("enrollment-date"));
}
