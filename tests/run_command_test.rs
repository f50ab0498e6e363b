//! End-to-end runs of the binary against a scratch home directory.
//!
//! The token service is pointed at a closed port so every run fails to get
//! a token right away.

use std::path::Path;
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const SAVED_SETTINGS: &str = r#"{
  "env": "sandbox",
  "credentials": {
    "sandbox": { "client_id": "saved-id", "access_key": "saved-key" }
  },
  "product": "income",
  "product_settings": { "deposit_value": 1.5 }
}"#;

fn closed_port_host() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn settings_path(home: &Path) -> std::path::PathBuf {
    home.join(".citadel-demo").join("settings.json")
}

fn write_saved_settings(home: &Path) {
    let path = settings_path(home);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, SAVED_SETTINGS).unwrap();
}

fn run(home: &Path, args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_citadel-demo"));
    command
        .args(args)
        .env("HOME", home)
        .env("CITADEL_API_HOST", closed_port_host())
        .env("CITADEL_TOKEN_TIMEOUT", "60");
    for name in [
        "CITADEL_ENV",
        "CITADEL_CLIENT_ID",
        "CITADEL_SANDBOX_KEY",
        "CITADEL_DEV_KEY",
        "CITADEL_PROD_KEY",
    ] {
        command.env_remove(name);
    }
    for (name, value) in vars {
        command.env(name, value);
    }
    command.output().expect("Failed to execute binary")
}

#[test]
fn test_failed_request_ends_run_without_waiting_for_timeout() {
    let home = TempDir::new().unwrap();
    write_saved_settings(home.path());

    let started = Instant::now();
    let output = run(home.path(), &[], &[]);

    assert!(output.status.success());
    assert!(started.elapsed() < Duration::from_secs(30));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bridge token: (none)"));
}

#[test]
fn test_plain_run_keeps_saved_settings() {
    let home = TempDir::new().unwrap();
    write_saved_settings(home.path());

    let output = run(home.path(), &[], &[]);
    assert!(output.status.success());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(settings_path(home.path())).unwrap()).unwrap();
    assert_eq!(saved["credentials"]["sandbox"]["access_key"], "saved-key");
    assert_eq!(saved["product"], "income");
    assert_eq!(saved["product_settings"]["deposit_value"], 1.5);
}

#[test]
fn test_overrides_are_not_persisted() {
    let home = TempDir::new().unwrap();
    write_saved_settings(home.path());

    let output = run(
        home.path(),
        &["--env", "prod", "--mapping-id", "Kroger"],
        &[("CITADEL_PROD_KEY", "one-off-key"), ("CITADEL_CLIENT_ID", "one-off-id")],
    );
    assert!(output.status.success());

    let contents = std::fs::read_to_string(settings_path(home.path())).unwrap();
    assert_eq!(contents, SAVED_SETTINGS);
}

#[test]
fn test_first_run_with_overrides_writes_nothing() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["--open"], &[("CITADEL_SANDBOX_KEY", "k")]);
    assert!(output.status.success());
    assert!(!settings_path(home.path()).exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Can’t open Citadel Bridge"));
    assert!(stdout.contains("[Open settings]"));
}
