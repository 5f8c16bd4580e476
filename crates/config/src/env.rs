//! Environment variable parsing and env-to-settings merging.
//!
//! Parsing is strict: a variable that is present but empty or unparseable
//! fails instead of silently falling back to the default.

use crate::settings::{GuardSettings, OutputFormat, SettingsOverrides};
use plan_guard_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: output format (`text` | `json`).
pub const ENV_OUTPUT: &str = "PLAN_GUARD_OUTPUT";
/// Env var: reject on warnings (true/false).
pub const ENV_DENY_WARNINGS: &str = "PLAN_GUARD_DENY_WARNINGS";
/// Env var: check resources in parallel (true/false).
pub const ENV_PARALLEL: &str = "PLAN_GUARD_PARALLEL";

const ALL_VARS: [&str; 3] = [ENV_OUTPUT, ENV_DENY_WARNINGS, ENV_PARALLEL];

/// Typed env-derived overrides for `GuardSettings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardEnv {
    /// Override for `output`.
    pub output: Option<OutputFormat>,
    /// Override for `denyWarnings`.
    pub deny_warnings: Option<bool>,
    /// Override for `parallel`.
    pub parallel: Option<bool>,
}

impl GuardEnv {
    /// Parse from an explicit map (used by tests and by `from_std_env`).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            output: parse_optional_output(map, ENV_OUTPUT)?,
            deny_warnings: parse_optional_bool(map, ENV_DENY_WARNINGS)?,
            parallel: parse_optional_bool(map, ENV_PARALLEL)?,
        })
    }

    /// Parse from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ALL_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// View as settings overrides.
    #[must_use]
    pub const fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            output: self.output,
            deny_warnings: self.deny_warnings,
            parallel: self.parallel,
        }
    }
}

/// Apply env overrides on top of `settings` and validate the result.
pub fn apply_env_overrides(
    settings: GuardSettings,
    env: &GuardEnv,
) -> Result<GuardSettings, ErrorEnvelope> {
    let settings = settings.with_overrides(&env.overrides());
    settings.validate()?;
    Ok(settings)
}

/// Errors raised while parsing env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
        }
    }
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_output(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<OutputFormat>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    OutputFormat::parse(raw)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}
