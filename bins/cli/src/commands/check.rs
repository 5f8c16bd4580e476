//! Check command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{render_findings, summary_line};
use plan_guard_config::{SettingsOverrides, load_settings_std_env};
use plan_guard_resources::{Snapshot, run_pass};
use plan_guard_shared::ErrorEnvelope;
use std::path::Path;

/// Run the check command.
pub fn run_check(
    snapshot_path: &Path,
    settings_path: Option<&Path>,
    flags: &SettingsOverrides,
) -> Result<CliOutput, CliError> {
    let settings = load_settings_std_env(settings_path)?.with_overrides(flags);
    let snapshot = Snapshot::from_path(snapshot_path).map_err(ErrorEnvelope::from)?;
    let outcome = run_pass(snapshot, settings.pass_options());

    Ok(CliOutput {
        stdout: render_findings(settings.output, &outcome.diagnostics, outcome.rejected)?,
        stderr: summary_line(&outcome.diagnostics, outcome.rejected),
        exit_code: if outcome.rejected {
            ExitCode::Rejected
        } else {
            ExitCode::Accepted
        },
    })
}
