//! Server workloads and their service endpoint.

use crate::Tags;
use plan_guard_domain::PlanValue;
use plan_guard_rules::PortAssociation;
use plan_guard_validate_derive::{Normalize, ValidateAttributes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A service that clients reach through the access proxy.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ServerWorkload {
    /// Display name.
    pub name: PlanValue<String>,
    /// Free-form description.
    pub description: PlanValue<String>,
    /// Whether the workload is enabled.
    pub is_active: PlanValue<bool>,
    /// Resource tags.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub tags: PlanValue<Tags>,
    /// Where the service listens.
    #[validate(nested)]
    #[normalize(nested)]
    pub service_endpoint: PlanValue<ServiceEndpoint>,
}

/// Network location and protocol settings of a server workload.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceEndpoint {
    /// Hostname, optionally with wildcard labels.
    #[validate(pattern = "StructuralHost")]
    pub host: PlanValue<String>,
    /// Application protocol (`HTTP`, `MCP`, ...).
    pub app_protocol: PlanValue<String>,
    /// Transport protocol (`TCP`).
    pub transport_protocol: PlanValue<String>,
    /// Port the service listens on.
    pub port: PlanValue<i64>,
    /// Port clients request; must equal `port` for MCP services.
    #[validate(with_siblings = "plan_guard_rules::requested_port_matches")]
    pub requested_port: PlanValue<i64>,
    /// Whether the service speaks TLS.
    pub tls: PlanValue<bool>,
    /// Whether clients request TLS.
    pub requested_tls: PlanValue<bool>,
    /// Certificate verification mode (`full`, `none`).
    pub tls_verification: PlanValue<String>,
    /// Static headers injected on forwarded requests.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub http_headers: PlanValue<BTreeMap<String, String>>,
    /// How credentials are presented to the service.
    pub authentication_config: PlanValue<AuthenticationConfig>,
}

/// Credential presentation method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticationConfig {
    /// Method (`HTTP Authentication`, `API Key`, ...).
    pub method: PlanValue<String>,
    /// Scheme within the method (`Bearer`, `Header`, ...).
    pub scheme: PlanValue<String>,
}

impl PortAssociation for ServiceEndpoint {
    fn app_protocol(&self) -> PlanValue<&str> {
        self.app_protocol.as_ref().map(String::as_str)
    }

    fn port(&self) -> PlanValue<i64> {
        self.port
    }
}
