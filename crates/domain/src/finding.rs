//! Findings and diagnostics accumulation.
//!
//! Checks return their findings as values; callers combine them by plain
//! concatenation. An object is rejected iff at least one error-severity
//! finding was produced.

use crate::path::AttributePath;
use plan_guard_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::fmt;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Rejects the configuration.
    Error,
    /// Reported but does not reject on its own.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => formatter.write_str("error"),
            Self::Warning => formatter.write_str("warning"),
        }
    }
}

/// Which rule family produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Value fails a pattern or length rule.
    Format,
    /// Cross-field invariant violated.
    Consistency,
    /// Composite key collision inside a collection.
    Duplicate,
    /// A normalizer could not parse its input.
    MalformedInput,
    /// The guard itself is broken (e.g. a catalog pattern failed to compile).
    Internal,
}

impl FindingKind {
    /// Stable snake-case identifier, used as the error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Consistency => "consistency",
            Self::Duplicate => "duplicate",
            Self::MalformedInput => "malformed_input",
            Self::Internal => "internal",
        }
    }
}

/// A structured validation/normalization result attached to an attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Error or warning.
    pub severity: Severity,
    /// Rule family.
    pub kind: FindingKind,
    /// Offending attribute.
    pub path: AttributePath,
    /// Short, operator-facing summary.
    pub summary: String,
    /// Longer explanation naming the expected format or relationship.
    pub detail: String,
}

impl Finding {
    /// Create an error-severity finding.
    pub fn error(
        kind: FindingKind,
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            path,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Create a warning-severity finding.
    pub fn warning(
        kind: FindingKind,
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, path, summary, detail)
        }
    }

    /// Returns true for error-severity findings.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: {}: {}",
            self.severity, self.path, self.summary
        )?;
        if !self.detail.is_empty() {
            write!(formatter, " ({})", self.detail)?;
        }
        Ok(())
    }
}

impl From<&Finding> for ErrorEnvelope {
    fn from(finding: &Finding) -> Self {
        let code = ErrorCode::new("validation", finding.kind.as_str());
        let envelope = if finding.kind == FindingKind::Internal {
            Self::invariant(code, finding.summary.clone())
        } else {
            Self::expected(code, finding.summary.clone())
        };
        envelope
            .with_metadata("path", finding.path.to_string())
            .with_metadata("severity", finding.severity.to_string())
            .with_metadata("detail", finding.detail.clone())
    }
}

/// Ordered, append-only sequence of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    findings: Vec<Finding>,
}

impl Diagnostics {
    /// Empty diagnostics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    /// Append one finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Append every finding of `other`, keeping order.
    pub fn append(&mut self, other: Self) {
        self.findings.extend(other.findings);
    }

    /// Returns true when at least one error-severity finding exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    /// Returns true when at least one warning exists.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Iterate error-severity findings.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| finding.is_error())
    }

    /// Iterate warning-severity findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| !finding.is_error())
    }

    /// Iterate all findings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns true when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Convert every error finding into an `ErrorEnvelope`.
    #[must_use]
    pub fn to_error_envelopes(&self) -> Vec<ErrorEnvelope> {
        self.errors().map(ErrorEnvelope::from).collect()
    }

    /// Consume into the underlying findings.
    #[must_use]
    pub fn into_vec(self) -> Vec<Finding> {
        self.findings
    }
}

impl From<Finding> for Diagnostics {
    fn from(finding: Finding) -> Self {
        Self {
            findings: vec![finding],
        }
    }
}

impl From<Vec<Finding>> for Diagnostics {
    fn from(findings: Vec<Finding>) -> Self {
        Self { findings }
    }
}

impl FromIterator<Finding> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self {
            findings: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Self> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        let mut combined = Self::new();
        for diagnostics in iter {
            combined.append(diagnostics);
        }
        combined
    }
}

impl Extend<Finding> for Diagnostics {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        self.findings.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_guard_shared::ErrorKind;

    fn format_error(path: &str) -> Finding {
        Finding::error(
            FindingKind::Format,
            AttributePath::attribute(path),
            "must be a valid hostname",
            "got: bad_host",
        )
    }

    #[test]
    fn warnings_alone_do_not_reject() {
        let diagnostics = Diagnostics::from(Finding::warning(
            FindingKind::Format,
            AttributePath::attribute("host"),
            "deprecated",
            "",
        ));
        assert!(!diagnostics.has_errors());
        assert!(diagnostics.has_warnings());
    }

    #[test]
    fn concatenation_keeps_order() {
        let mut first = Diagnostics::from(format_error("a"));
        let second: Diagnostics = vec![format_error("b"), format_error("c")].into();
        first.append(second);

        let paths: Vec<String> = first.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
        assert_eq!(first.errors().count(), 3);
    }

    #[test]
    fn collects_nested_diagnostics() {
        let combined: Diagnostics = vec![
            Diagnostics::from(format_error("x")),
            Diagnostics::new(),
            Diagnostics::from(format_error("y")),
        ]
        .into_iter()
        .collect();
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn findings_map_to_envelopes() {
        let envelopes = Diagnostics::from(format_error("host")).to_error_envelopes();
        assert_eq!(envelopes.len(), 1);
        let envelope = &envelopes[0];
        assert_eq!(envelope.kind, ErrorKind::Expected);
        assert_eq!(envelope.code, ErrorCode::new("validation", "format"));
        assert_eq!(envelope.metadata.get("path").map(String::as_str), Some("host"));
    }

    #[test]
    fn display_includes_path_and_detail() {
        assert_eq!(
            format_error("host").to_string(),
            "error: host: must be a valid hostname (got: bad_host)"
        );
    }
}
