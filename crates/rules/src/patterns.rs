//! Pattern catalog.
//!
//! Every domain string type is a named, anchored grammar. The catalog is
//! compiled once on first use and shared by all validators.

use plan_guard_shared::{ErrorCode, ErrorEnvelope};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// A named grammar from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// 8-4-4-4-12 hex groups, optionally wrapped in `{}`.
    Uuid,
    /// `local@domain.tld`.
    Email,
    /// Snowflake account locator.
    SnowflakeAccount,
    /// Snowflake login name.
    SnowflakeUserName,
    /// Any `http://` or `https://` URL.
    UrlScheme,
    /// `https://` with a dotted hostname and optional port/path.
    SecureUrl,
    /// RFC 1123 hostname.
    HostName,
    /// Hostname with constrained `*` wildcard labels.
    StructuralHost,
    /// Dotted-quad IPv4 address.
    HostIp,
    /// AWS region slug used by S3 buckets.
    S3BucketRegion,
    /// S3 bucket name.
    S3BucketName,
    /// S3 key prefix.
    S3PathPrefix,
    /// GCS bucket name without periods.
    GcsBucketNameSimple,
    /// GCS bucket name with periods (domain-named buckets).
    GcsBucketNameWithPeriod,
    /// GCS object prefix.
    GcsPathPrefix,
    /// HTTP event collector `host:port`.
    HecHostPort,
    /// Dash-delimited UUID token without braces.
    AuthenticationToken,
}

const UUID: &str = concat!(
    r"^(?:\{[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\}",
    r"|[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$"
);

const HOST_NAME: &str = concat!(
    r"^(?:(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])\.)*",
    r"(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])$"
);

// Wildcard labels must be followed by at least two literal labels.
const STRUCTURAL_HOST: &str = concat!(
    r"^(?:",
    r"(?:(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])\.)*",
    r"(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])",
    r"|",
    r"(?:(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]",
    r"|\*|[A-Za-z0-9][A-Za-z0-9-]*\*|\*[A-Za-z0-9-]*[A-Za-z0-9]",
    r"|[A-Za-z0-9][A-Za-z0-9-]*\*[A-Za-z0-9-]*[A-Za-z0-9])\.)+",
    r"(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])\.",
    r"(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])",
    r")$"
);

const HOST_IP: &str = concat!(
    r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}",
    r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
);

const AUTHENTICATION_TOKEN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

impl Pattern {
    /// Every catalog entry, in catalog order.
    pub const ALL: [Self; 17] = [
        Self::Uuid,
        Self::Email,
        Self::SnowflakeAccount,
        Self::SnowflakeUserName,
        Self::UrlScheme,
        Self::SecureUrl,
        Self::HostName,
        Self::StructuralHost,
        Self::HostIp,
        Self::S3BucketRegion,
        Self::S3BucketName,
        Self::S3PathPrefix,
        Self::GcsBucketNameSimple,
        Self::GcsBucketNameWithPeriod,
        Self::GcsPathPrefix,
        Self::HecHostPort,
        Self::AuthenticationToken,
    ];

    /// Stable catalog name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Email => "email",
            Self::SnowflakeAccount => "snowflake_account",
            Self::SnowflakeUserName => "snowflake_user_name",
            Self::UrlScheme => "url_scheme",
            Self::SecureUrl => "secure_url",
            Self::HostName => "host_name",
            Self::StructuralHost => "structural_host",
            Self::HostIp => "host_ip",
            Self::S3BucketRegion => "s3_bucket_region",
            Self::S3BucketName => "s3_bucket_name",
            Self::S3PathPrefix => "s3_path_prefix",
            Self::GcsBucketNameSimple => "gcs_bucket_name_simple",
            Self::GcsBucketNameWithPeriod => "gcs_bucket_name_with_period",
            Self::GcsPathPrefix => "gcs_path_prefix",
            Self::HecHostPort => "hec_host_port",
            Self::AuthenticationToken => "authentication_token",
        }
    }

    /// The anchored regular expression.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::Uuid => UUID,
            Self::Email => r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$",
            Self::SnowflakeAccount => r"^[A-Za-z0-9-]+$",
            Self::SnowflakeUserName => r"^[A-Za-z0-9_@]+$",
            Self::UrlScheme => r"^(?:http|https)://.*$",
            Self::SecureUrl => r"^https://[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+(?::[0-9]+)?(?:/.*)?$",
            Self::HostName => HOST_NAME,
            Self::StructuralHost => STRUCTURAL_HOST,
            Self::HostIp => HOST_IP,
            Self::S3BucketRegion => r"^[a-z0-9-]+$",
            Self::S3BucketName => r"^[a-z0-9][a-z0-9.-]*[a-z0-9]$",
            Self::S3PathPrefix => r#"^[^\\{}^%`\[\]"<>~#|]*$"#,
            Self::GcsBucketNameSimple => r"^[a-z0-9_-]{3,63}$",
            Self::GcsBucketNameWithPeriod => r"^[a-z0-9._-]{3,222}$",
            Self::GcsPathPrefix => r#"^[^#\[\]*?:"<>|]{0,256}$"#,
            Self::HecHostPort => r"^[A-Za-z0-9.-]+:[0-9]{2,5}$",
            Self::AuthenticationToken => AUTHENTICATION_TOKEN,
        }
    }

    /// Operator-facing rejection message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Uuid => "must be a valid UUID",
            Self::Email => "must be a valid email",
            Self::SnowflakeAccount => "must be a valid Snowflake account identifier",
            Self::SnowflakeUserName => "must be a valid Snowflake username",
            Self::UrlScheme => "must begin with http:// or https://",
            Self::SecureUrl => "must be a valid HTTPS URL",
            Self::HostName => "must be a valid hostname",
            Self::StructuralHost => {
                "must be a valid hostname, with wildcards only in labels followed by at least two literal labels"
            },
            Self::HostIp => "must be a valid IPv4 address",
            Self::S3BucketRegion => "must be a valid AWS region",
            Self::S3BucketName => "must be a valid S3 bucket name",
            Self::S3PathPrefix => r#"must not contain any of the characters \{}^%`[]"<>~#|"#,
            Self::GcsBucketNameSimple | Self::GcsBucketNameWithPeriod => {
                "must be a valid GCS bucket name"
            },
            Self::GcsPathPrefix => {
                r#"must be at most 256 characters and not contain any of #[]*?:"<>|"#
            },
            Self::HecHostPort => "must be in host:port format",
            Self::AuthenticationToken => "must be a valid authentication token",
        }
    }

    /// Test `value` against the compiled pattern.
    pub fn is_match(self, value: &str) -> Result<bool, PatternError> {
        match CATALOG.get(self as usize) {
            Some(Ok(regex)) => Ok(regex.is_match(value)),
            Some(Err(reason)) => Err(PatternError {
                pattern: self,
                reason: reason.clone(),
            }),
            None => Err(PatternError {
                pattern: self,
                reason: "missing from catalog".to_string(),
            }),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

static CATALOG: LazyLock<Vec<Result<Regex, String>>> = LazyLock::new(|| {
    Pattern::ALL
        .iter()
        .map(|pattern| Regex::new(pattern.source()).map_err(|error| error.to_string()))
        .collect()
});

/// A catalog pattern that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// The broken pattern.
    pub pattern: Pattern,
    /// Compiler message.
    pub reason: String,
}

impl PatternError {
    /// Stable error code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::new("rules", "pattern_compile")
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "pattern {} failed to compile: {}",
            self.pattern, self.reason
        )
    }
}

impl std::error::Error for PatternError {}

impl From<PatternError> for ErrorEnvelope {
    fn from(error: PatternError) -> Self {
        Self::invariant(error.error_code(), error.to_string())
            .with_metadata("pattern", error.pattern.name())
    }
}

/// Check that every catalog pattern compiles.
pub fn verify_catalog() -> Result<(), PatternError> {
    for pattern in Pattern::ALL {
        pattern.is_match("")?;
    }
    Ok(())
}
