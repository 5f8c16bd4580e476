//! Log streams and their destinations.

use crate::Tags;
use plan_guard_domain::PlanValue;
use plan_guard_shared::SecretString;
use plan_guard_validate_derive::{Normalize, ValidateAttributes};
use serde::{Deserialize, Serialize};

/// Exports audit or access events to an external sink.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct LogStream {
    /// Display name.
    pub name: PlanValue<String>,
    /// Free-form description.
    pub description: PlanValue<String>,
    /// Whether the stream is enabled.
    pub is_active: PlanValue<bool>,
    /// Resource tags.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub tags: PlanValue<Tags>,
    /// Event family (`AuditLogs`, `AccessAuthorizationEvents`, ...).
    pub data_type: PlanValue<String>,
    /// Where events are delivered.
    #[validate(nested)]
    #[normalize(nested)]
    pub destination: PlanValue<LogStreamDestination>,
}

/// The destination kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize)]
#[serde(rename_all = "snake_case")]
pub enum LogStreamDestination {
    /// Amazon S3 bucket.
    AwsS3Bucket(AwsS3Bucket),
    /// Google Cloud Storage bucket.
    GcsBucket(GcsBucket),
    /// Splunk HTTP event collector.
    SplunkHttpEventCollector(SplunkHttpEventCollector),
    /// CrowdStrike HTTP event collector.
    CrowdstrikeHttpEventCollector(CrowdstrikeHttpEventCollector),
}

/// S3 destination.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct AwsS3Bucket {
    /// Bucket region.
    #[validate(length(min = 8, max = 30), pattern = "S3BucketRegion")]
    pub s3_bucket_region: PlanValue<String>,
    /// Bucket name.
    #[validate(length(min = 3, max = 63), pattern = "S3BucketName")]
    pub s3_bucket_name: PlanValue<String>,
    /// Key prefix for written objects.
    #[validate(length(min = 3, max = 800), pattern = "S3PathPrefix")]
    pub s3_path_prefix: PlanValue<String>,
}

/// GCS destination.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct GcsBucket {
    /// Bucket name.
    #[validate(with = "plan_guard_rules::formats::gcs_bucket_name")]
    pub gcs_bucket_name: PlanValue<String>,
    /// Object prefix for written objects.
    #[validate(pattern = "GcsPathPrefix")]
    pub gcs_path_prefix: PlanValue<String>,
    /// Workload identity audience.
    pub audience: PlanValue<String>,
    /// Service account used to write.
    #[validate(pattern = "Email")]
    pub service_account_email: PlanValue<String>,
    /// Token lifetime in seconds.
    pub token_lifetime: PlanValue<i64>,
}

/// Splunk HEC destination.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct SplunkHttpEventCollector {
    /// Collector `host:port`.
    #[validate(pattern = "HecHostPort")]
    pub splunk_host_port: PlanValue<String>,
    /// HEC token.
    #[validate(pattern = "AuthenticationToken")]
    pub authentication_token: PlanValue<SecretString>,
    /// Event source name.
    pub source_name: PlanValue<String>,
    /// Whether to use TLS.
    pub tls: PlanValue<bool>,
    /// Certificate verification mode.
    pub tls_verification: PlanValue<String>,
}

/// CrowdStrike HEC destination.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct CrowdstrikeHttpEventCollector {
    /// Collector `host:port`.
    #[validate(pattern = "HecHostPort")]
    pub host_port: PlanValue<String>,
    /// Ingest API key.
    pub api_key: PlanValue<SecretString>,
    /// Event source name.
    pub source_name: PlanValue<String>,
    /// Whether to use TLS.
    pub tls: PlanValue<bool>,
    /// Certificate verification mode.
    pub tls_verification: PlanValue<String>,
}
