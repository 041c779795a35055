//! Logging behavior of the binary: quiet by default, file output on request.

use std::fs;
use std::process::Command;

use crate::integration::hierarchical_fixture;
use tempfile::TempDir;

#[test]
fn test_default_run_does_not_log_progress_to_stderr() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_configurator"))
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("CONFIGURATOR_LOG")
        .arg("-d")
        .arg(fixture.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Configurator starting"),
        "info events should be filtered at the default level: {stderr}"
    );
}

#[test]
fn test_log_file_output() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();
    let log_file = home.path().join("logs/run.log");

    let output = Command::new(env!("CARGO_BIN_EXE_configurator"))
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("CONFIGURATOR_LOG")
        .arg("-d")
        .arg(fixture.path())
        .args(["--log-level", "info", "--log-output", "file", "--log-file"])
        .arg(&log_file)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let contents = fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Configurator starting"));
    assert!(contents.contains("Template written"));
}

#[test]
fn test_json_log_format() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();
    let log_file = home.path().join("run.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_configurator"))
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("CONFIGURATOR_LOG")
        .arg("-d")
        .arg(fixture.path())
        .args(["-w", "--log-level", "debug", "--log-format", "json"])
        .args(["--log-output", "file", "--log-file"])
        .arg(&log_file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let contents = fs::read_to_string(&log_file).unwrap();
    for line in contents.lines() {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(event.get("level").is_some());
    }
    assert!(contents.contains("Preview only"));
}
