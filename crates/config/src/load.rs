//! Settings loading helpers (defaults + file + env).
//!
//! The loader owns the merge order and surfaces user-facing errors as typed
//! `ErrorEnvelope`s.

use crate::env::{GuardEnv, apply_env_overrides};
use crate::settings::GuardSettings;
use plan_guard_shared::{ErrorCode, ErrorEnvelope, Result};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Json,
    Toml,
}

/// Load settings from in-memory JSON using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`GuardEnv`)
/// - settings JSON
/// - defaults (`GuardSettings::default()`)
pub fn load_settings_from_sources(
    settings_json: Option<&str>,
    env: &GuardEnv,
) -> Result<GuardSettings> {
    let settings = match settings_json {
        None => GuardSettings::default(),
        Some(input) => parse_settings(input, SettingsFormat::Json)?,
    };
    apply_env_overrides(settings, env)
}

/// Load settings from an optional file path, then apply env overrides.
pub fn load_settings_from_path(
    settings_path: Option<&Path>,
    env: &GuardEnv,
) -> Result<GuardSettings> {
    let settings = match settings_path {
        None => GuardSettings::default(),
        Some(path) => {
            let format = detect_settings_format(path)?;
            let text = read_settings_file(path)?;
            debug!(
                target: "plan_guard::config",
                path = %path.display(),
                "loaded settings file"
            );
            parse_settings(&text, format)?
        },
    };
    apply_env_overrides(settings, env)
}

/// Load settings from the process environment and an optional file path.
pub fn load_settings_std_env(settings_path: Option<&Path>) -> Result<GuardSettings> {
    let env = GuardEnv::from_std_env()?;
    load_settings_from_path(settings_path, &env)
}

/// Serialize settings as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(settings: &GuardSettings) -> Result<String> {
    let mut output = serde_json::to_string_pretty(settings).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize settings: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_settings(input: &str, format: SettingsFormat) -> Result<GuardSettings> {
    match format {
        SettingsFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid settings JSON: {error}"),
            )
            .with_metadata("source", "settings")
        }),
        SettingsFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid settings TOML: {error}"),
            )
            .with_metadata("source", "settings")
        }),
    }
}

fn read_settings_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "settings_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "settings_file_permission_denied")
            },
            _ => ErrorCode::new("config", "settings_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read settings file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_settings_format(path: &Path) -> Result<SettingsFormat> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(SettingsFormat::Json),
        Some("toml") => Ok(SettingsFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported settings format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
