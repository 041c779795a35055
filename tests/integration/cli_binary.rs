//! Runs the built `configurator` binary against fixture trees.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::integration::{hierarchical_fixture, write_file};
use tempfile::TempDir;

/// Run the binary with config lookups pointed into `home`.
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_configurator"))
        .env("HOME", home.join("home"))
        .env("XDG_CONFIG_HOME", home.join("xdg-config"))
        .env_remove("CONFIGURATOR_LOG")
        .env("NO_COLOR", "1")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_fills_template_and_reports_progress() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();
    let root = fixture.path().to_string_lossy().to_string();

    let output = run(home.path(), &["-d", &root, "-e", "prod"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configurator version:"));
    assert!(stdout.contains("Using template file:"));
    assert!(stdout.contains("Loading value file"));
    assert!(stdout.contains("with values from [prod.app.config]"));
    assert!(stdout.contains("Done"));

    let written = fs::read_to_string(fixture.path().join("svc/app.config")).unwrap();
    assert!(written.contains("https://prod.example.com"));
}

#[test]
fn test_whatif_leaves_template_untouched() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();
    let root = fixture.path().to_string_lossy().to_string();
    let template = fixture.path().join("svc/app.config");
    let before = fs::read(&template).unwrap();

    let output = run(home.path(), &["-d", &root, "--whatif"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Replace '%%Url%%' with 'http://dev.local' on line 2"));
    assert!(stdout.contains("preview only"));
    assert_eq!(fs::read(&template).unwrap(), before);
}

#[test]
fn test_missing_value_files_exits_with_status_one() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(dir.path(), "app.config", "%A%");
    let root = dir.path().to_string_lossy().to_string();

    let output = run(home.path(), &["-d", &root]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No value files found"));
    // Progress printed before the failure is kept.
    assert!(String::from_utf8_lossy(&output.stdout).contains("Searching in:"));
}

#[test]
fn test_ambiguous_environment_exits_with_status_one() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();
    write_file(fixture.path(), "svc/prod.backup.app.config", "Url=x\n");
    let root = fixture.path().to_string_lossy().to_string();

    let output = run(home.path(), &["-d", &root, "-e", "prod"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Multiple matching value files were found"));
    assert!(stderr.contains("Try again in interactive mode."));
}

#[test]
fn test_json_format_prints_outcome() {
    let fixture = hierarchical_fixture();
    let home = TempDir::new().unwrap();
    let root = fixture.path().to_string_lossy().to_string();

    let output = run(home.path(), &["-d", &root, "-e", "qa", "--format", "json", "-w"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["applied"]["title"], "qa.app.config -> prod.app.config");
    assert_eq!(json["applied"]["written"], false);
    assert_eq!(json["discovery"]["templates"].as_array().unwrap().len(), 1);
}

#[test]
fn test_json_format_prints_error_object() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let root = dir.path().to_string_lossy().to_string();

    let output = run(home.path(), &["-d", &root, "--format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("No valid template files"));
}

#[cfg(unix)]
#[test]
fn test_explicit_symlinked_template_is_written_through() {
    let dir = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let target = write_file(dir.path(), "real/MyApp.exe.config", "url=%Url%");
    write_file(dir.path(), "dev.app.config", "Url=http://dev\n");
    let link = dir.path().join("link.config");
    std::os::unix::fs::symlink(&target, &link).unwrap();
    let root = dir.path().to_string_lossy().to_string();
    let link_arg = link.to_string_lossy().to_string();

    let output = run(home.path(), &["-d", &root, "-t", &link_arg]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&target).unwrap(), "url=http://dev");
}
