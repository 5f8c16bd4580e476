//! Normalize command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{render_text, summary_line};
use plan_guard_config::load_settings_std_env;
use plan_guard_resources::{Snapshot, run_pass};
use plan_guard_shared::ErrorEnvelope;
use std::path::Path;

/// Run the normalize command.
///
/// The normalized snapshot goes to stdout only when the pass accepts it;
/// otherwise the findings are written to stderr.
pub fn run_normalize(
    snapshot_path: &Path,
    settings_path: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let settings = load_settings_std_env(settings_path)?;
    let snapshot = Snapshot::from_path(snapshot_path).map_err(ErrorEnvelope::from)?;
    let outcome = run_pass(snapshot, settings.pass_options());
    let summary = summary_line(&outcome.diagnostics, outcome.rejected);
    let findings = render_text(&outcome.diagnostics);

    match outcome.accepted() {
        Ok(snapshot) => Ok(CliOutput {
            stdout: snapshot.into_inner().to_pretty_json()?,
            stderr: findings + &summary,
            exit_code: ExitCode::Accepted,
        }),
        Err(_) => Ok(CliOutput {
            stdout: String::new(),
            stderr: findings + &summary,
            exit_code: ExitCode::Rejected,
        }),
    }
}
