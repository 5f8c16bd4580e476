//! End-to-end tests for settings precedence in the CLI.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .unwrap_or(manifest_dir);
    root.join("crates").join("resources").join("tests").join("fixtures").join(name)
}

fn temp_settings(name: &str, contents: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("plan-guard-e2e-{}-{name}", std::process::id()));
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn check_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_plan-guard"));
    command
        .arg("check")
        .arg(fixture("plan_rejected.json"))
        .env_remove("PLAN_GUARD_OUTPUT")
        .env_remove("PLAN_GUARD_DENY_WARNINGS")
        .env_remove("PLAN_GUARD_PARALLEL");
    command
}

#[test]
fn env_selects_json_output() -> Result<(), Box<dyn Error>> {
    let output = check_command().env("PLAN_GUARD_OUTPUT", "json").output()?;
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report.get("rejected"), Some(&serde_json::json!(true)));
    Ok(())
}

#[test]
fn flag_wins_over_env_and_settings_file() -> Result<(), Box<dyn Error>> {
    let settings = temp_settings("flags.toml", "output = \"json\"\nparallel = false\n")?;
    let output = check_command()
        .arg("--settings")
        .arg(&settings)
        .arg("--output")
        .arg("text")
        .env("PLAN_GUARD_OUTPUT", "json")
        .output();
    std::fs::remove_file(&settings)?;
    let output = output?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().all(|line| line.starts_with("error: ")), "{stdout}");
    Ok(())
}

#[test]
fn invalid_env_value_is_invalid_input() -> Result<(), Box<dyn Error>> {
    let output = check_command().env("PLAN_GUARD_PARALLEL", "sometimes").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config:invalid_env_bool"));
    Ok(())
}

#[test]
fn unknown_settings_key_is_invalid_input() -> Result<(), Box<dyn Error>> {
    let settings = temp_settings("unknown.json", "{\"colour\": true}")?;
    let output = check_command().arg("--settings").arg(&settings).output();
    std::fs::remove_file(&settings)?;
    let output = output?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config:invalid_json"));
    Ok(())
}

#[test]
fn settings_command_prints_effective_settings() -> Result<(), Box<dyn Error>> {
    let settings = temp_settings("show.toml", "denyWarnings = true\n")?;
    let output = Command::new(env!("CARGO_BIN_EXE_plan-guard"))
        .arg("settings")
        .arg("--settings")
        .arg(&settings)
        .env_remove("PLAN_GUARD_OUTPUT")
        .env_remove("PLAN_GUARD_DENY_WARNINGS")
        .env("PLAN_GUARD_PARALLEL", "no")
        .output();
    std::fs::remove_file(&settings)?;
    let output = output?;

    assert_eq!(output.status.code(), Some(0));
    let effective: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        effective,
        serde_json::json!({
            "version": 1,
            "output": "text",
            "denyWarnings": true,
            "parallel": false
        })
    );
    Ok(())
}
