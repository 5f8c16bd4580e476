//! Settings command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use plan_guard_config::{load_settings_std_env, to_pretty_json};
use std::path::Path;

/// Print the effective settings (defaults, file, env) as JSON.
pub fn run_settings(settings_path: Option<&Path>) -> Result<CliOutput, CliError> {
    let settings = load_settings_std_env(settings_path)?;
    Ok(CliOutput {
        stdout: to_pretty_json(&settings)?,
        stderr: String::new(),
        exit_code: ExitCode::Accepted,
    })
}
