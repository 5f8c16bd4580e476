//! Settings schema for the guard itself.

use plan_guard_resources::PassOptions;
use plan_guard_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported settings schema version.
pub const CURRENT_SETTINGS_VERSION: u32 = 1;

/// How findings are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per finding.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl OutputFormat {
    /// Stable identifier used in settings files and env vars.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Parse an identifier, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Effective settings for a guard run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GuardSettings {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Rendering of findings.
    pub output: OutputFormat,
    /// Reject on warnings as well as errors.
    pub deny_warnings: bool,
    /// Check resources on the rayon pool.
    pub parallel: bool,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            version: CURRENT_SETTINGS_VERSION,
            output: OutputFormat::Text,
            deny_warnings: false,
            parallel: true,
        }
    }
}

impl GuardSettings {
    /// Check the schema version.
    pub const fn validate(&self) -> Result<(), SettingsError> {
        if self.version != CURRENT_SETTINGS_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_SETTINGS_VERSION,
            });
        }
        Ok(())
    }

    /// Apply explicit overrides; `None` keeps the current value.
    #[must_use]
    pub fn with_overrides(self, overrides: &SettingsOverrides) -> Self {
        Self {
            output: overrides.output.unwrap_or(self.output),
            deny_warnings: overrides.deny_warnings.unwrap_or(self.deny_warnings),
            parallel: overrides.parallel.unwrap_or(self.parallel),
            ..self
        }
    }

    /// Options for the validation pass.
    #[must_use]
    pub const fn pass_options(&self) -> PassOptions {
        PassOptions {
            deny_warnings: self.deny_warnings,
            parallel: self.parallel,
        }
    }
}

/// Partial settings layered on top of a base (env vars, CLI flags).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Override for `output`.
    pub output: Option<OutputFormat>,
    /// Override for `denyWarnings`.
    pub deny_warnings: Option<bool>,
    /// Override for `parallel`.
    pub parallel: Option<bool>,
}

/// Schema-level settings errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
}

impl SettingsError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported settings version {found} (supported: {supported})"
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<SettingsError> for ErrorEnvelope {
    fn from(error: SettingsError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            SettingsError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn defaults_run_in_parallel_with_text_output() {
        let settings = GuardSettings::default();
        assert_eq!(settings.output, OutputFormat::Text);
        assert!(settings.parallel);
        assert!(!settings.deny_warnings);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn overrides_only_touch_present_fields() {
        let settings = GuardSettings::default().with_overrides(&SettingsOverrides {
            deny_warnings: Some(true),
            ..SettingsOverrides::default()
        });
        assert!(settings.deny_warnings);
        assert!(settings.parallel);
        assert_eq!(settings.output, OutputFormat::Text);

        let options = settings.pass_options();
        assert!(options.deny_warnings && options.parallel);
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!(OutputFormat::parse(" JSON "), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let parsed: Result<GuardSettings, _> =
            serde_json::from_str(r#"{"output": "json", "colour": true}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn unsupported_version_maps_to_envelope() -> Result<(), Box<dyn Error>> {
        let settings: GuardSettings = serde_json::from_str(r#"{"version": 2}"#)?;
        let envelope = ErrorEnvelope::from(settings.validate().err().ok_or("expected error")?);
        assert_eq!(envelope.code, ErrorCode::new("config", "unsupported_version"));
        assert_eq!(envelope.metadata.get("found").map(String::as_str), Some("2"));
        Ok(())
    }
}
