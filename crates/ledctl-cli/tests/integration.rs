//! Integration tests for ledctl-cli.
//!
//! Tests cover the CLI binary invocation against a temporary configuration
//! file: init, validate, effects and sinks listing.

use std::process::Command;

/// Helper to get the path to the `ledctl` binary built by cargo.
fn ledctl_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ledctl"))
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `ledctl --help` / `--version`
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = ledctl_bin().arg("--help").output().expect("failed to run ledctl --help");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ledctl LED lighting controller CLI"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("effects"));
    assert!(stdout.contains("sinks"));
}

#[test]
fn cli_version_works() {
    let output = ledctl_bin().arg("--version").output().expect("failed to run ledctl --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ledctl"));
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `ledctl effects`
// ---------------------------------------------------------------------------

#[test]
fn cli_effects_lists_all_effects() {
    let output = ledctl_bin().arg("effects").output().expect("failed to run ledctl effects");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available Effects"));

    for effect in ["Rainbow", "Fire 2012", "Matrix", "Waves", "Beat Pulse"] {
        assert!(stdout.contains(effect), "effects listing should contain '{effect}'");
    }
}

#[test]
fn cli_effects_detail_shows_engine_info() {
    let output = ledctl_bin().args(["effects", "Matrix"]).output().expect("failed to run ledctl effects Matrix");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Matrix"));
    assert!(stdout.contains("ledfx"));
    assert!(stdout.contains("audio reactive:  true"));
}

#[test]
fn cli_effects_unknown_effect_fails() {
    let output = ledctl_bin()
        .args(["effects", "nonexistent_effect_xyz"])
        .output()
        .expect("failed to run ledctl effects");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown effect"));
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `ledctl init` / `validate` / `sinks`
// ---------------------------------------------------------------------------

#[test]
fn cli_init_then_validate_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    let init = ledctl_bin()
        .args(["init", "--path", config_path.to_str().unwrap()])
        .output()
        .expect("failed to run ledctl init");
    assert!(init.status.success(), "init failed: {}", String::from_utf8_lossy(&init.stderr));
    assert!(config_path.exists());

    let validate = ledctl_bin()
        .args(["validate", "--path", config_path.to_str().unwrap()])
        .output()
        .expect("failed to run ledctl validate");
    assert!(validate.status.success(), "validate failed: {}", String::from_utf8_lossy(&validate.stderr));
    let stdout = String::from_utf8_lossy(&validate.stdout);
    assert!(stdout.contains("No configuration drift found."));
}

#[test]
fn cli_init_refuses_to_overwrite_without_force() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    ledctl_bin().args(["init", "--path", config_path.to_str().unwrap()]).output().unwrap();

    let second = ledctl_bin()
        .args(["init", "--path", config_path.to_str().unwrap()])
        .output()
        .expect("failed to run ledctl init a second time");
    assert!(!second.status.success(), "second init without --force should fail");
}

#[test]
fn cli_sinks_lists_an_empty_default_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    ledctl_bin().args(["init", "--path", config_path.to_str().unwrap()]).output().unwrap();

    let output = ledctl_bin()
        .args(["sinks", "--path", config_path.to_str().unwrap()])
        .output()
        .expect("failed to run ledctl sinks");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No sinks defined"));
}

#[test]
fn cli_validate_missing_file_fails() {
    let output = ledctl_bin()
        .args(["validate", "--path", "/tmp/nonexistent_ledctl_test_config_12345.toml"])
        .output()
        .expect("failed to run ledctl validate");
    assert!(!output.status.success());
}
