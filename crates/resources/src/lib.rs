//! # plan-guard-resources
//!
//! Resource models with their validators and normalizers attached
//! declaratively, plus the pass that runs them over a snapshot.
//!
//! Mutually exclusive nested blocks (credential provider kinds, log stream
//! destinations, client identity types) are enums, so a configuration with
//! zero or several of them populated fails to parse.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::collections::BTreeMap;

pub mod access_policy;
pub mod client_workload;
pub mod credential_provider;
pub mod integration;
pub mod log_stream;
pub mod pass;
pub mod server_workload;
pub mod snapshot;

pub use access_policy::{AccessPolicy, PolicyCredentialProvider};
pub use client_workload::{ClientIdentity, ClientWorkload};
pub use credential_provider::{CredentialProvider, CredentialProviderKind};
pub use integration::{Integration, IntegrationOauth};
pub use log_stream::{LogStream, LogStreamDestination};
pub use pass::{PassOptions, PassOutcome, PassRejected, run_pass};
pub use server_workload::{AuthenticationConfig, ServerWorkload, ServiceEndpoint};
pub use snapshot::{Resource, ResourceConfig, Snapshot, SnapshotError};

/// Free-form resource tags.
pub type Tags = BTreeMap<String, String>;

/// Returns the resources crate version.
#[must_use]
pub const fn resources_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
