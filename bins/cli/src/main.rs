//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{run_check, run_normalize, run_settings};
use error::CliError;
use format::OutputArg;
use plan_guard_config::SettingsOverrides;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Env var holding the tracing filter directives.
const ENV_LOG: &str = "PLAN_GUARD_LOG";
/// Env var selecting JSON log lines on stderr.
const ENV_LOG_FORMAT: &str = "PLAN_GUARD_LOG_FORMAT";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "plan-guard",
    version,
    about = "Plan-time validation and normalization of resource configurations",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a plan snapshot and report findings.
    Check {
        /// Snapshot file (JSON).
        snapshot: PathBuf,
        /// Optional settings file (JSON/TOML).
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Output format for findings.
        #[arg(long, value_enum)]
        output: Option<OutputArg>,
        /// Reject the plan on warnings too.
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Print the normalized snapshot when the plan is accepted.
    Normalize {
        /// Snapshot file (JSON).
        snapshot: PathBuf,
        /// Optional settings file (JSON/TOML).
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Print the effective settings as JSON.
    Settings {
        /// Optional settings file (JSON/TOML).
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: error::ExitCode,
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(ENV_LOG_FORMAT).is_ok_and(|value| value.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    // A subscriber may already be installed; logging is best effort.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands) -> Result<CliOutput, CliError> {
    match command {
        Commands::Check {
            snapshot,
            settings,
            output,
            deny_warnings,
        } => {
            let flags = SettingsOverrides {
                output: output.map(Into::into),
                deny_warnings: deny_warnings.then_some(true),
                parallel: None,
            };
            run_check(snapshot, settings.as_deref(), &flags)
        },
        Commands::Normalize { snapshot, settings } => run_normalize(snapshot, settings.as_deref()),
        Commands::Settings { settings } => run_settings(settings.as_deref()),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
