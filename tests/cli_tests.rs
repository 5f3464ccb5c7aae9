// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for the `l10n-gen` binary.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn l10n_gen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_l10n-gen"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let import = dir.path().join("i18n");
    fs::create_dir_all(&import).unwrap();
    fs::write(import.join("en.json"), r#"{"greeting": "Hello"}"#).unwrap();
    fs::write(import.join("fr.json"), r#"{"greeting": "Bonjour"}"#).unwrap();
    dir
}

#[test]
fn test_check_runs_without_export_path() {
    let dir = fixture();
    let import = dir.path().join("i18n");
    let output = l10n_gen(&["check", "--import-path", import.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Locales: EN, FR"));
}

#[test]
fn test_generate_json_prints_only_the_summary() {
    let dir = fixture();
    let import = dir.path().join("i18n");
    let export = dir.path().join("out/i18n.rs");
    let output = l10n_gen(&[
        "generate",
        "--json",
        "--import-path",
        import.to_str().unwrap(),
        "--export-path",
        export.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document");
    assert_eq!(summary["locales"], serde_json::json!(["EN", "FR"]));
    assert_eq!(summary["files"], 2);
    assert!(export.exists());
}

#[test]
fn test_generate_requires_export_path() {
    let dir = fixture();
    let import = dir.path().join("i18n");
    let output = l10n_gen(&["generate", "--import-path", import.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("export_path is required"));
}
