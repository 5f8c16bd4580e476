//! End-to-end tests for `plan-guard normalize`.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .unwrap_or(manifest_dir);
    root.join("crates")
        .join("resources")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_normalize(path: &Path) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_plan-guard"))
        .arg("normalize")
        .arg(path)
        .env_remove("PLAN_GUARD_OUTPUT")
        .env_remove("PLAN_GUARD_DENY_WARNINGS")
        .env_remove("PLAN_GUARD_PARALLEL")
        .output()
}

fn find_resource<'a>(
    snapshot: &'a serde_json::Value,
    kind: &str,
) -> Option<&'a serde_json::Value> {
    snapshot
        .get("resources")?
        .as_array()?
        .iter()
        .find(|resource| resource.get("type").and_then(serde_json::Value::as_str) == Some(kind))
}

#[test]
fn accepted_plan_prints_canonical_snapshot() -> Result<(), Box<dyn Error>> {
    let output = run_normalize(&fixture("plan_accepted.json"))?;
    assert_eq!(output.status.code(), Some(0));

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let policy = find_resource(&snapshot, "credential_provider")
        .and_then(|resource| resource.pointer("/attributes/kind/aws_sts/session_policy"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(
        policy,
        Some("{\"Version\":\"2012-10-17\",\"Statement\":[]}")
    );
    Ok(())
}

#[test]
fn normalized_output_is_a_fixed_point() -> Result<(), Box<dyn Error>> {
    let first = run_normalize(&fixture("plan_accepted.json"))?;
    assert_eq!(first.status.code(), Some(0));

    let path = std::env::temp_dir().join(format!(
        "plan-guard-e2e-normalized-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, &first.stdout)?;
    let second = run_normalize(&path);
    std::fs::remove_file(&path)?;
    let second = second?;

    assert_eq!(second.status.code(), Some(0));
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn rejected_plan_prints_nothing_on_stdout() -> Result<(), Box<dyn Error>> {
    let output = run_normalize(&fixture("plan_rejected.json"))?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("malformed input"), "{stderr}");
    assert!(stderr.contains("plan rejected: 5 error(s)"), "{stderr}");
    Ok(())
}
