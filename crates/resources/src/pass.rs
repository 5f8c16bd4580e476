//! The validation pass over a whole snapshot.
//!
//! For each resource every validator runs, then every normalizer. Findings
//! are aggregated across all attributes and resources; nothing
//! short-circuits across attributes.

use crate::snapshot::{ResourceConfig, Snapshot};
use plan_guard_domain::{Diagnostics, Finding, FindingKind};
use plan_guard_shared::{ErrorCode, ErrorEnvelope, Validated};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

/// Policy knobs for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassOptions {
    /// Treat warnings as rejecting. The built-in rules only report errors,
    /// so this applies to warnings from custom rules.
    pub deny_warnings: bool,
    /// Check resources on the rayon pool.
    pub parallel: bool,
}

/// Result of a pass: the normalized snapshot and every finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    /// Snapshot after normalization; attributes that failed to normalize keep
    /// their input value.
    pub snapshot: Snapshot,
    /// Findings in resource order, validators before normalizers.
    pub diagnostics: Diagnostics,
    /// Whether the plan may not proceed.
    pub rejected: bool,
}

impl PassOutcome {
    /// The normalized snapshot, only if the pass accepted it.
    pub fn accepted(self) -> Result<Validated<Snapshot>, PassRejected> {
        if self.rejected {
            return Err(PassRejected {
                errors: self.diagnostics.errors().count(),
                warnings: self.diagnostics.warnings().count(),
            });
        }
        Ok(Validated::new(self.snapshot))
    }
}

/// A pass that rejected the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRejected {
    /// Error-severity findings.
    pub errors: usize,
    /// Warning-severity findings.
    pub warnings: usize,
}

impl PassRejected {
    /// Stable error code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::new("validation", "rejected")
    }
}

impl fmt::Display for PassRejected {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "plan rejected with {} error(s) and {} warning(s)",
            self.errors, self.warnings
        )
    }
}

impl std::error::Error for PassRejected {}

impl From<PassRejected> for ErrorEnvelope {
    fn from(error: PassRejected) -> Self {
        Self::expected(error.error_code(), error.to_string())
            .with_metadata("errors", error.errors.to_string())
            .with_metadata("warnings", error.warnings.to_string())
    }
}

/// Validate and normalize every resource of `snapshot`.
pub fn run_pass(snapshot: Snapshot, options: PassOptions) -> PassOutcome {
    let mut diagnostics = duplicate_ids(&snapshot.resources);
    let resource_count = snapshot.resources.len();

    let checked: Vec<(ResourceConfig, Diagnostics)> = if options.parallel {
        snapshot.resources.into_par_iter().map(check_resource).collect()
    } else {
        snapshot.resources.into_iter().map(check_resource).collect()
    };

    let mut resources = Vec::with_capacity(checked.len());
    for (resource, findings) in checked {
        diagnostics.append(findings);
        resources.push(resource);
    }

    let rejected = rejects(&diagnostics, options);
    let errors = diagnostics.errors().count();
    let warnings = diagnostics.warnings().count();
    if rejected {
        warn!(
            target: "plan_guard::pass",
            resources = resource_count,
            errors,
            warnings,
            "plan rejected"
        );
    } else {
        info!(
            target: "plan_guard::pass",
            resources = resource_count,
            errors,
            warnings,
            "plan accepted"
        );
    }

    PassOutcome {
        snapshot: Snapshot { resources },
        diagnostics,
        rejected,
    }
}

fn check_resource(resource: ResourceConfig) -> (ResourceConfig, Diagnostics) {
    let mut diagnostics = resource.validate();
    let resource = resource.normalize().report_into(&mut diagnostics);
    (resource, diagnostics)
}

// Two resources of the same type sharing an id would share attribute paths.
fn duplicate_ids(resources: &[ResourceConfig]) -> Diagnostics {
    let mut first_seen: HashMap<(&str, &str), usize> = HashMap::with_capacity(resources.len());
    let mut diagnostics = Diagnostics::new();
    for (position, resource) in resources.iter().enumerate() {
        let key = (resource.kind(), resource.id());
        if let Some(first) = first_seen.get(&key) {
            diagnostics.push(Finding::error(
                FindingKind::Duplicate,
                resource.path(),
                "duplicate resource id",
                format!("resources[{position}] reuses the id of resources[{first}]"),
            ));
        } else {
            first_seen.insert(key, position);
        }
    }
    diagnostics
}

fn rejects(diagnostics: &Diagnostics, options: PassOptions) -> bool {
    diagnostics.has_errors() || (options.deny_warnings && diagnostics.has_warnings())
}
