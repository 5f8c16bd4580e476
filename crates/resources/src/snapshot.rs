//! Plan snapshots: the ordered set of resource configurations under check.

use crate::{AccessPolicy, ClientWorkload, CredentialProvider, Integration, LogStream, ServerWorkload};
use plan_guard_domain::{AttributePath, Diagnostics, Normalize, Normalized, ValidateAttributes};
use plan_guard_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Every resource of one plan, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Resources in plan order.
    pub resources: Vec<ResourceConfig>,
}

/// One configured resource and its id within the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource<T> {
    /// Plan-local resource id.
    pub id: String,
    /// Configured attributes.
    pub attributes: T,
}

/// A resource tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceConfig {
    /// A server workload.
    ServerWorkload(Resource<ServerWorkload>),
    /// A client workload.
    ClientWorkload(Resource<ClientWorkload>),
    /// A credential provider.
    CredentialProvider(Resource<CredentialProvider>),
    /// An access policy.
    AccessPolicy(Resource<AccessPolicy>),
    /// A log stream.
    LogStream(Resource<LogStream>),
    /// An integration.
    Integration(Resource<Integration>),
}

impl<T: ValidateAttributes + Normalize> Resource<T> {
    fn validate(&self, kind: &str) -> Diagnostics {
        self.attributes.validate_attributes(&root_path(kind, &self.id))
    }

    fn normalize(self, kind: &str) -> Normalized<Self> {
        let path = root_path(kind, &self.id);
        let Self { id, attributes } = self;
        attributes
            .normalize(&path)
            .map(|attributes| Self { id, attributes })
    }
}

fn root_path(kind: &str, id: &str) -> AttributePath {
    AttributePath::attribute(kind).child(id)
}

impl ResourceConfig {
    /// Resource type name as written in snapshots.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ServerWorkload(_) => "server_workload",
            Self::ClientWorkload(_) => "client_workload",
            Self::CredentialProvider(_) => "credential_provider",
            Self::AccessPolicy(_) => "access_policy",
            Self::LogStream(_) => "log_stream",
            Self::Integration(_) => "integration",
        }
    }

    /// Plan-local resource id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::ServerWorkload(resource) => &resource.id,
            Self::ClientWorkload(resource) => &resource.id,
            Self::CredentialProvider(resource) => &resource.id,
            Self::AccessPolicy(resource) => &resource.id,
            Self::LogStream(resource) => &resource.id,
            Self::Integration(resource) => &resource.id,
        }
    }

    /// Root of this resource's attribute paths (`<type>.<id>`).
    #[must_use]
    pub fn path(&self) -> AttributePath {
        root_path(self.kind(), self.id())
    }

    /// Run every attached validator.
    #[must_use]
    pub fn validate(&self) -> Diagnostics {
        let kind = self.kind();
        match self {
            Self::ServerWorkload(resource) => resource.validate(kind),
            Self::ClientWorkload(resource) => resource.validate(kind),
            Self::CredentialProvider(resource) => resource.validate(kind),
            Self::AccessPolicy(resource) => resource.validate(kind),
            Self::LogStream(resource) => resource.validate(kind),
            Self::Integration(resource) => resource.validate(kind),
        }
    }

    /// Run every attached normalizer.
    #[must_use]
    pub fn normalize(self) -> Normalized<Self> {
        let kind = self.kind();
        match self {
            Self::ServerWorkload(resource) => resource.normalize(kind).map(Self::ServerWorkload),
            Self::ClientWorkload(resource) => resource.normalize(kind).map(Self::ClientWorkload),
            Self::CredentialProvider(resource) => {
                resource.normalize(kind).map(Self::CredentialProvider)
            },
            Self::AccessPolicy(resource) => resource.normalize(kind).map(Self::AccessPolicy),
            Self::LogStream(resource) => resource.normalize(kind).map(Self::LogStream),
            Self::Integration(resource) => resource.normalize(kind).map(Self::Integration),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Failure to obtain a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The input is not a valid snapshot document.
    Parse {
        /// Parser message.
        message: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },
}

impl SnapshotError {
    /// Stable error code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::new("snapshot", "not_found")
            },
            Self::Io { .. } => ErrorCode::new("snapshot", "io"),
            Self::Parse { .. } => ErrorCode::new("snapshot", "invalid_json"),
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(formatter, "failed to read snapshot {}: {source}", path.display())
            },
            Self::Parse { message, .. } => write!(formatter, "invalid snapshot: {message}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}

impl From<SnapshotError> for ErrorEnvelope {
    fn from(error: SnapshotError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        match error {
            SnapshotError::Io { path, source } => {
                let envelope = if source.kind() == std::io::ErrorKind::NotFound {
                    Self::expected(code, message)
                } else {
                    Self::unexpected(code, message)
                };
                envelope.with_metadata("path", path.to_string_lossy().to_string())
            },
            SnapshotError::Parse { line, column, .. } => Self::expected(code, message)
                .with_metadata("line", line.to_string())
                .with_metadata("column", column.to_string()),
        }
    }
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Read and parse a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let input = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&input)
    }

    /// Serialize as pretty JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, ErrorEnvelope> {
        let mut output = serde_json::to_string_pretty(self).map_err(|error| {
            ErrorEnvelope::invariant(
                ErrorCode::internal(),
                format!("failed to serialize snapshot: {error}"),
            )
        })?;
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    const SNAPSHOT: &str = r#"{
        "resources": [
            {"type": "server_workload", "id": "web", "attributes": {
                "service_endpoint": {"host": "web.example.com", "port": 443}
            }},
            {"type": "integration", "id": "wiz", "attributes": {"endpoint": "https://api.wiz.example"}}
        ]
    }"#;

    #[test]
    fn parses_tagged_resources_in_order() -> Result<(), Box<dyn Error>> {
        let snapshot = Snapshot::from_json_str(SNAPSHOT)?;
        let ids: Vec<(&str, &str)> = snapshot
            .resources
            .iter()
            .map(|resource| (resource.kind(), resource.id()))
            .collect();
        assert_eq!(ids, vec![("server_workload", "web"), ("integration", "wiz")]);
        assert_eq!(
            snapshot.resources[0].path().to_string(),
            "server_workload.web"
        );
        Ok(())
    }

    #[test]
    fn unknown_resource_types_are_parse_errors() {
        let error = Snapshot::from_json_str(
            r#"{"resources": [{"type": "trust_provider", "id": "t", "attributes": {}}]}"#,
        )
        .err();
        assert_eq!(
            error.map(|error| error.error_code()),
            Some(ErrorCode::new("snapshot", "invalid_json"))
        );
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let path = std::env::temp_dir().join("plan-guard-missing-snapshot.json");
        let envelope: Option<ErrorEnvelope> =
            Snapshot::from_path(&path).err().map(ErrorEnvelope::from);
        assert_eq!(
            envelope.map(|envelope| envelope.code),
            Some(ErrorCode::new("snapshot", "not_found"))
        );
    }

    #[test]
    fn pretty_output_round_trips() -> Result<(), Box<dyn Error>> {
        let snapshot = Snapshot::from_json_str(SNAPSHOT)?;
        let rendered = snapshot.to_pretty_json()?;
        assert!(rendered.ends_with('\n'));
        assert_eq!(Snapshot::from_json_str(&rendered)?, snapshot);
        Ok(())
    }
}
