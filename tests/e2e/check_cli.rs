//! End-to-end tests for `plan-guard check`.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture(name: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("resources")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_check(args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_plan-guard"))
        .arg("check")
        .args(args)
        .env_remove("PLAN_GUARD_OUTPUT")
        .env_remove("PLAN_GUARD_DENY_WARNINGS")
        .env_remove("PLAN_GUARD_PARALLEL")
        .env_remove("PLAN_GUARD_LOG")
        .output()
}

fn path_arg(path: &Path) -> Result<&str, Box<dyn Error>> {
    path.to_str().ok_or_else(|| "non-utf8 fixture path".into())
}

#[test]
fn accepted_plan_exits_zero_with_no_findings() -> Result<(), Box<dyn Error>> {
    let plan = fixture("plan_accepted.json");
    let output = run_check(&[path_arg(&plan)?])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("plan accepted"));
    Ok(())
}

#[test]
fn rejected_plan_prints_one_line_per_finding() -> Result<(), Box<dyn Error>> {
    let plan = fixture("plan_rejected.json");
    let output = run_check(&[path_arg(&plan)?])?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "{stdout}");
    assert!(lines.iter().all(|line| line.starts_with("error: ")));
    assert!(
        lines
            .first()
            .is_some_and(|line| line.contains("server_workload.mcp-gateway.service_endpoint.host"))
    );
    Ok(())
}

#[test]
fn json_output_reports_rejection_and_findings() -> Result<(), Box<dyn Error>> {
    let plan = fixture("plan_rejected.json");
    let output = run_check(&[path_arg(&plan)?, "--output", "json"])?;

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report.get("rejected"), Some(&serde_json::json!(true)));

    let kinds: Vec<&str> = report
        .get("findings")
        .and_then(serde_json::Value::as_array)
        .ok_or("findings must be an array")?
        .iter()
        .filter_map(|finding| finding.get("kind").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(
        kinds,
        vec!["format", "consistency", "malformed_input", "duplicate", "format"]
    );
    Ok(())
}

#[test]
fn output_is_identical_across_runs() -> Result<(), Box<dyn Error>> {
    let plan = fixture("plan_rejected.json");
    let first = run_check(&[path_arg(&plan)?, "--output", "json"])?;
    let second = run_check(&[path_arg(&plan)?, "--output", "json"])?;
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn missing_snapshot_is_invalid_input() -> Result<(), Box<dyn Error>> {
    let missing = std::env::temp_dir().join("plan-guard-e2e-missing-plan.json");
    let output = run_check(&[path_arg(&missing)?])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("snapshot:not_found"));
    Ok(())
}

#[test]
fn unparseable_snapshot_is_invalid_input() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!(
        "plan-guard-e2e-broken-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, "{\"resources\": [")?;
    let output = run_check(&[path_arg(&path)?]);
    std::fs::remove_file(&path)?;
    let output = output?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("snapshot:invalid_json"));
    Ok(())
}
