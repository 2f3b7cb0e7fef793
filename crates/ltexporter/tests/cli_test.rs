//! Integration tests for the `ltexporter` CLI binary.
//!
//! Every scrape runs against a replay fixture written to a temp dir, so no
//! device is needed.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ltexporter` binary with env isolation.
///
/// Points config directories at a nonexistent path so tests never touch
/// the user's real configuration.
fn ltexporter_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ltexporter");
    cmd.env("HOME", "/tmp/ltexporter-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ltexporter-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("LTEXPORTER_CONFIG")
        .env_remove("LTEXPORTER_OUTPUT");
    cmd
}

const FIXTURE: &str = r#"[
    { "path": "/interface/lte/print", "reply": [{ "name": "lte1" }, { "name": "lte2" }] },
    { "path": "/interface/lte/monitor", "match": { ".id": "lte1" },
      "reply": [{ "rssi": "-70", "session-uptime": "1h2m3s",
                  "primary-band": "B3 10MHz", "current-cellid": "12345" }] },
    { "path": "/interface/lte/monitor", "match": { ".id": "lte2" }, "reply": [] }
]"#;

const FAILING_FIXTURE: &str = r#"[
    { "path": "/interface/lte/print", "trap": { "message": "no such command prefix" } }
]"#;

const CONFIG: &str = r#"
[[devices]]
name = "edge-1"
address = "10.0.0.1"

[[devices]]
name = "edge-2"
address = "10.0.0.2"
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = ltexporter_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    ltexporter_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("describe")
            .and(predicate::str::contains("scrape"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_completions_bash() {
    ltexporter_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Describe ────────────────────────────────────────────────────────

#[test]
fn test_describe_plain_lists_every_metric() {
    let output = ltexporter_cmd()
        .args(["describe", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names.len(), 12);
    assert_eq!(names[0], "lte_interface_current_cellid");
    assert_eq!(names[11], "lte_interface_session_uptime");
}

#[test]
fn test_describe_json_carries_label_schema() {
    let output = ltexporter_cmd()
        .args(["describe", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value[3]["label_names"],
        serde_json::json!(["name", "address", "interface", "cellid", "primaryband", "caband"])
    );
}

#[test]
fn test_describe_respects_disabled_collector() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "config.toml", "[features]\nlte = false\n");
    ltexporter_cmd()
        .args(["describe", "-o", "plain", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── Scrape ──────────────────────────────────────────────────────────

#[test]
fn test_scrape_ad_hoc_device_plain_is_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FIXTURE);
    let output = ltexporter_cmd()
        .args(["scrape", "--name", "edge-1", "--address", "10.0.0.1", "-o", "plain", "--replay"])
        .arg(&replay)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("# HELP lte_interface_rssi Received signal strength indicator in dBm\n"));
    assert!(stdout.contains("# TYPE lte_interface_rssi gauge\n"));
    assert!(stdout.contains("# HELP lte_interface_session_uptime Seconds since the data session was established\n"));
    assert!(stdout.contains("# TYPE lte_interface_session_uptime counter\n"));
    assert!(stdout.contains("} -70\n"), "{stdout}");
    assert!(stdout.contains("} 3723\n"), "{stdout}");
    for label in [
        r#"name="edge-1""#,
        r#"address="10.0.0.1""#,
        r#"interface="lte1""#,
        r#"cellid="12345""#,
        r#"primaryband="B3""#,
    ] {
        assert!(stdout.contains(label), "missing {label} in:\n{stdout}");
    }
}

#[test]
fn test_scrape_plain_escapes_label_values() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FIXTURE);
    ltexporter_cmd()
        .args(["scrape", "--name", "e\"1", "--address", "10.0.0.1", "-o", "plain", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"name="e\"1""#));
}

#[test]
fn test_scrape_configured_devices_json() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FIXTURE);
    let config = write(dir.path(), "config.toml", CONFIG);
    let output = ltexporter_cmd()
        .args(["scrape", "-o", "json", "--config"])
        .arg(&config)
        .arg("--replay")
        .arg(&replay)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let samples = value.as_array().unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0]["labels"]["name"], "edge-1");
    assert_eq!(samples[2]["labels"]["name"], "edge-2");
    assert_eq!(samples[0]["kind"], "gauge");
    assert_eq!(samples[0]["value"], -70.0);
    assert_eq!(samples[1]["metric"], "lte_interface_session_uptime");
    assert_eq!(samples[1]["kind"], "counter");
    assert_eq!(samples[1]["value"], 3723.0);
}

#[test]
fn test_scrape_selects_one_configured_device() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FIXTURE);
    let config = write(dir.path(), "config.toml", CONFIG);
    ltexporter_cmd()
        .args(["scrape", "-o", "plain", "--device", "edge-2", "--config"])
        .arg(&config)
        .arg("--replay")
        .arg(&replay)
        .assert()
        .success()
        .stdout(predicate::str::contains("name=\"edge-2\"").and(predicate::str::contains("edge-1").not()));
}

#[test]
fn test_scrape_unknown_device_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FIXTURE);
    let config = write(dir.path(), "config.toml", CONFIG);
    ltexporter_cmd()
        .args(["scrape", "--device", "edge-9", "--config"])
        .arg(&config)
        .arg("--replay")
        .arg(&replay)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("edge-9"));
}

#[test]
fn test_scrape_without_devices_fails() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FIXTURE);
    ltexporter_cmd()
        .args(["scrape", "--replay"])
        .arg(&replay)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No devices to scrape"));
}

#[test]
fn test_scrape_transport_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let replay = write(dir.path(), "replay.json", FAILING_FIXTURE);
    ltexporter_cmd()
        .args(["scrape", "--name", "edge-1", "--address", "10.0.0.1", "--replay"])
        .arg(&replay)
        .assert()
        .code(7)
        .stderr(predicate::str::contains("1 of 1 device scrapes failed"));
}

#[test]
fn test_scrape_missing_fixture() {
    ltexporter_cmd()
        .args([
            "scrape",
            "--name",
            "edge-1",
            "--address",
            "10.0.0.1",
            "--replay",
            "/tmp/ltexporter-cli-test-nonexistent/replay.json",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("replay fixture"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_uses_override() {
    ltexporter_cmd()
        .args(["config", "path", "--config", "/tmp/elsewhere.toml"])
        .assert()
        .success()
        .stdout("/tmp/elsewhere.toml\n");
}

#[test]
fn test_config_show_prints_toml() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "config.toml", CONFIG);
    ltexporter_cmd()
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("sink_capacity = 256")
                .and(predicate::str::contains("name = \"edge-2\"")),
        );
}

#[test]
fn test_invalid_config_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "config.toml", "[log]\nformat = \"xml\"\n");
    ltexporter_cmd()
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("log.format"));
}
