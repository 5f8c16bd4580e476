//! Output format helpers for CLI commands.

use crate::error::CliError;
use clap::ValueEnum;
use plan_guard_config::OutputFormat;
use plan_guard_domain::Diagnostics;
use serde::Serialize;

/// Output format choices accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// One line per finding.
    Text,
    /// A single JSON document.
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => Self::Text,
            OutputArg::Json => Self::Json,
        }
    }
}

#[derive(Serialize)]
struct FindingsReport<'a> {
    rejected: bool,
    findings: &'a Diagnostics,
}

/// Render findings for stdout.
pub fn render_findings(
    format: OutputFormat,
    diagnostics: &Diagnostics,
    rejected: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(render_text(diagnostics)),
        OutputFormat::Json => {
            let report = FindingsReport {
                rejected,
                findings: diagnostics,
            };
            let mut output = serde_json::to_string_pretty(&report)?;
            output.push('\n');
            Ok(output)
        },
    }
}

/// One line per finding.
pub fn render_text(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .map(|finding| format!("{finding}\n"))
        .collect()
}

/// Summary line for stderr.
pub fn summary_line(diagnostics: &Diagnostics, rejected: bool) -> String {
    let status = if rejected { "rejected" } else { "accepted" };
    format!(
        "plan {status}: {} error(s), {} warning(s)\n",
        diagnostics.errors().count(),
        diagnostics.warnings().count()
    )
}
