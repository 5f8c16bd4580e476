//! Format validators.
//!
//! Each validator wraps one catalog pattern or a length bound. Null and
//! unknown values pass. Validators attached to the same attribute do not
//! short-circuit each other: a value that fails both a length bound and a
//! pattern yields two findings.

use crate::patterns::{Pattern, PatternError};
use plan_guard_domain::{AttributePath, Diagnostics, Finding, FindingKind, PlanValue};
use plan_guard_shared::redact_if_secret;
use tracing::debug;

/// Check a known value against one catalog pattern.
pub fn matches_pattern<T: AsRef<str>>(
    path: &AttributePath,
    value: &PlanValue<T>,
    pattern: Pattern,
) -> Diagnostics {
    let Some(text) = value.as_known_str() else {
        return Diagnostics::new();
    };
    match pattern.is_match(text) {
        Ok(true) => Diagnostics::new(),
        Ok(false) => rejected(path, pattern.name(), pattern.message(), text).into(),
        Err(error) => internal(path, &error).into(),
    }
}

/// Check a known value against a set of alternative patterns; passes when
/// any of them matches.
pub fn matches_any<T: AsRef<str>>(
    path: &AttributePath,
    value: &PlanValue<T>,
    patterns: &[Pattern],
    message: &str,
) -> Diagnostics {
    let Some(text) = value.as_known_str() else {
        return Diagnostics::new();
    };
    let mut broken = Diagnostics::new();
    for pattern in patterns {
        match pattern.is_match(text) {
            Ok(true) => return Diagnostics::new(),
            Ok(false) => {},
            Err(error) => broken.push(internal(path, &error)),
        }
    }
    if !broken.is_empty() {
        return broken;
    }
    let rule = patterns
        .iter()
        .map(|pattern| pattern.name())
        .collect::<Vec<_>>()
        .join("|");
    rejected(path, &rule, message, text).into()
}

/// Check that a known value has between `min` and `max` characters.
pub fn length_between<T: AsRef<str>>(
    path: &AttributePath,
    value: &PlanValue<T>,
    min: usize,
    max: usize,
) -> Diagnostics {
    let Some(text) = value.as_known_str() else {
        return Diagnostics::new();
    };
    let length = text.chars().count();
    if (min..=max).contains(&length) {
        return Diagnostics::new();
    }
    debug!(target: "plan_guard::rules", path = %path, rule = "length", "value rejected");
    Finding::error(
        FindingKind::Format,
        path.clone(),
        format!("string length must be between {min} and {max}, got: {length}"),
        format!("expected {min}..={max} characters"),
    )
    .into()
}

/// GCS bucket names: either the simple form or the domain-named form.
pub fn gcs_bucket_name<T: AsRef<str>>(path: &AttributePath, value: &PlanValue<T>) -> Diagnostics {
    matches_any(
        path,
        value,
        &[Pattern::GcsBucketNameSimple, Pattern::GcsBucketNameWithPeriod],
        Pattern::GcsBucketNameSimple.message(),
    )
}

fn rejected(path: &AttributePath, rule: &str, message: &str, text: &str) -> Finding {
    debug!(target: "plan_guard::rules", path = %path, rule, "value rejected");
    let shown = redact_if_secret(path.last_attribute().unwrap_or_default(), text);
    Finding::error(
        FindingKind::Format,
        path.clone(),
        message,
        format!("expected {rule} format, got: {shown:?}"),
    )
}

fn internal(path: &AttributePath, error: &PatternError) -> Finding {
    tracing::error!(target: "plan_guard::rules", path = %path, %error, "catalog pattern unavailable");
    Finding::error(
        FindingKind::Internal,
        path.clone(),
        "validator unavailable",
        error.to_string(),
    )
}
