use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn skywatch_cmd() -> Command {
    Command::cargo_bin("skywatch-cli").expect("binary should be built")
}

#[test]
fn writes_html_report_by_default() {
    let dir = TempDir::new().expect("create temp dir");
    let out = dir.path().join("report.html");

    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).expect("report file should exist");
    assert!(html.contains("<h1>Daily watchdog report"));
    assert!(html.contains("<h2>Instances</h2>"));
    assert!(html.contains("web-1"));
    // test-db is ignored, web-2 fails the notify rule.
    assert!(!html.contains("test-db"));
    assert!(!html.contains("web-2"));
}

#[test]
fn highlighted_rows_carry_the_alert_style() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.html");

    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("background-color: darkorange"));
}

#[test]
fn no_output_prints_to_stdout() {
    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--no-output")
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Instances =="))
        .stdout(predicate::str::contains("web-1"));
}

#[test]
fn json_format_emits_the_report_model() {
    let output = skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--no-output")
        .arg("--format")
        .arg("json")
        .output()
        .expect("command should run");

    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(parsed["schema_version"], "0.1.0");
    assert_eq!(parsed["title"], "Daily watchdog report");

    let titles: Vec<&str> = parsed["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Inaccessible Projects", "Instances", "IAM", "Firewalls"]
    );
}

#[test]
fn inaccessible_projects_are_reported_not_fatal() {
    let output = skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--no-output")
        .arg("--format")
        .arg("json")
        .output()
        .expect("command should run");

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let denied = &parsed["sections"][0];

    assert_eq!(denied["title"], "Inaccessible Projects");
    assert_eq!(denied["rows"][0][0], "locked-down");
    assert_eq!(denied["rows"][0][1], "compute-unreachable");
}

#[test]
fn unknown_rule_key_aborts_with_context() {
    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("bad_config.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("machine"))
        .stderr(predicate::str::contains("compute.ignore-rules"));
}

#[test]
fn missing_config_file_fails() {
    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg("/does/not/exist.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn missing_snapshot_file_fails() {
    skywatch_cmd()
        .arg("/does/not/exist.json")
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot"));
}

#[test]
fn missing_snapshot_arg_prints_usage() {
    skywatch_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_format_flag_fails() {
    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn email_without_api_key_fails() {
    skywatch_cmd()
        .arg(fixtures_dir().join("snapshot.json"))
        .arg("--config")
        .arg(fixtures_dir().join("config.yaml"))
        .arg("--no-output")
        .arg("--email")
        .env_remove("SENDGRID_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SENDGRID_API_KEY"));
}

#[test]
fn help_flag_prints_usage() {
    skywatch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cloud account watchdog"));
}

#[test]
fn version_flag_prints_version() {
    skywatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skywatch"));
}
