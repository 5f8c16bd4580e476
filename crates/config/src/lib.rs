//! # plan-guard-config
//!
//! Settings for the guard itself: output format, warning policy and
//! parallelism, merged from defaults, an optional settings file and the
//! environment. CLI flags are layered on top by the binary.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Environment variable parsing and merging.
pub mod env;
/// Settings loading helpers (file + env).
pub mod load;
/// Settings schema types.
pub mod settings;

pub use env::{
    ENV_DENY_WARNINGS, ENV_OUTPUT, ENV_PARALLEL, EnvParseError, GuardEnv, apply_env_overrides,
};
pub use load::{
    load_settings_from_path, load_settings_from_sources, load_settings_std_env, to_pretty_json,
};
pub use settings::{
    CURRENT_SETTINGS_VERSION, GuardSettings, OutputFormat, SettingsError, SettingsOverrides,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
