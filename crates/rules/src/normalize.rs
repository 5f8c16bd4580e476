//! Plan normalizers.
//!
//! Normalizers rewrite a value into canonical form before it is committed.
//! Null and unknown inputs pass through unchanged, except for the
//! empty-collection default which exists to replace them.

use plan_guard_domain::{AttributePath, Finding, FindingKind, Normalized, PlanValue};
use plan_guard_shared::{ErrorCode, ErrorEnvelope};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

// =============================================================================
// JSON CANONICALIZER
// =============================================================================

/// Input that is not a syntactically valid JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedJson {
    /// 1-based line of the parse failure.
    pub line: usize,
    /// 1-based column of the parse failure.
    pub column: usize,
    /// Parser message.
    pub message: String,
}

impl MalformedJson {
    /// Stable error code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::new("validation", "malformed_input")
    }
}

impl fmt::Display for MalformedJson {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "malformed input: {}", self.message)
    }
}

impl std::error::Error for MalformedJson {}

impl From<serde_json::Error> for MalformedJson {
    fn from(error: serde_json::Error) -> Self {
        Self {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}

impl From<MalformedJson> for ErrorEnvelope {
    fn from(error: MalformedJson) -> Self {
        Self::expected(error.error_code(), error.to_string())
            .with_metadata("line", error.line.to_string())
            .with_metadata("column", error.column.to_string())
    }
}

/// Minify a JSON document, keeping key order and value semantics.
///
/// The output is a fixed point: canonicalizing it again yields the same
/// bytes.
pub fn canonicalize_json(input: &str) -> Result<String, MalformedJson> {
    let document: serde_json::Value = serde_json::from_str(input.trim())?;
    Ok(document.to_string())
}

/// Normalizer form of [`canonicalize_json`] for a plan attribute.
///
/// On malformed input the attribute keeps its value and a
/// `MalformedInput` finding is reported.
pub fn canonical_json(value: PlanValue<String>, path: &AttributePath) -> Normalized<PlanValue<String>> {
    let PlanValue::Known(text) = value else {
        return Normalized::clean(value);
    };
    match canonicalize_json(&text) {
        Ok(canonical) => {
            if canonical != text {
                debug!(target: "plan_guard::rules", path = %path, "rewrote JSON value");
            }
            Normalized::clean(PlanValue::Known(canonical))
        },
        Err(error) => {
            debug!(target: "plan_guard::rules", path = %path, rule = "canonical_json", "value rejected");
            Normalized {
                value: PlanValue::Known(text),
                diagnostics: Finding::error(
                    FindingKind::MalformedInput,
                    path.clone(),
                    "malformed input",
                    format!("{} at line {} column {}", error.message, error.line, error.column),
                )
                .into(),
            }
        },
    }
}

// =============================================================================
// EMPTY-COLLECTION DEFAULT
// =============================================================================

/// Collections that have an explicit empty value.
pub trait EmptyCollection: Default {}

impl<T> EmptyCollection for Vec<T> {}
impl<K, V> EmptyCollection for BTreeMap<K, V> {}
impl<T> EmptyCollection for BTreeSet<T> {}

/// Replace a null or unknown collection with an explicitly empty one.
///
/// Known collections, empty or not, pass through unchanged.
pub fn empty_default<C: EmptyCollection>(
    value: PlanValue<C>,
    path: &AttributePath,
) -> Normalized<PlanValue<C>> {
    match value {
        PlanValue::Known(_) => Normalized::clean(value),
        PlanValue::Null | PlanValue::Unknown => {
            debug!(target: "plan_guard::rules", path = %path, "defaulted to empty collection");
            Normalized::clean(PlanValue::Known(C::default()))
        },
    }
}
