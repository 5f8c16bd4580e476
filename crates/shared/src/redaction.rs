//! Secret detection and redaction utilities.
//!
//! Findings and error metadata echo the offending value back to the operator.
//! Attributes that carry credentials must never be echoed verbatim, so every
//! value surfaced in a message goes through [`redact_if_secret`] keyed by the
//! attribute name.

use serde::{Deserialize, Serialize};

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if an attribute/variable name likely refers to a secret.
///
/// Uses case-insensitive pattern matching to detect common secret-related
/// naming conventions.
///
/// # Examples
///
/// ```
/// use plan_guard_shared::is_secret_key;
///
/// assert!(is_secret_key("client_secret"));
/// assert!(is_secret_key("authentication_token"));
/// assert!(is_secret_key("header_value"));
/// assert!(!is_secret_key("account_name"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
        || key.ends_with("HEADER_VALUE")
}

/// Redacts a value if the key is likely a secret.
///
/// Returns `"[REDACTED]"` for secret keys, or the original value otherwise.
///
/// # Examples
///
/// ```
/// use plan_guard_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("api_key", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("host", "db.internal"), "db.internal");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on Display/Debug.
///
/// Serializes as the plain inner string so snapshots round-trip unchanged.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_secret_attributes() {
        assert!(is_secret_key("api_key"));
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("password"));
        assert!(is_secret_key("authentication_token"));
        assert!(is_secret_key("header_value"));
        assert!(is_secret_key("aws_credentials"));
    }

    #[test]
    fn rejects_non_secret_attributes() {
        assert!(!is_secret_key("account_name"));
        assert!(!is_secret_key("header_name"));
        assert!(!is_secret_key("port"));
        assert!(!is_secret_key("s3_bucket_name"));
        assert!(!is_secret_key("httpbody_field_value"));
    }

    #[test]
    fn redacts_secret_values() {
        assert_eq!(redact_if_secret("api_key", "sk-123456"), REDACTED);
        assert_eq!(redact_if_secret("password", "hunter2"), REDACTED);
        assert_eq!(redact_if_secret("host", "example.com"), "example.com");
    }

    #[test]
    fn secret_string_redacts_display_but_serializes_plainly() -> Result<(), serde_json::Error> {
        let secret = SecretString::new("shh");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(serde_json::to_string(&secret)?, "\"shh\"");
        Ok(())
    }
}
