//! Access policies linking clients, servers and credential providers.

use crate::Tags;
use plan_guard_domain::PlanValue;
use plan_guard_rules::CredentialMapping;
use plan_guard_validate_derive::{Normalize, ValidateAttributes};
use serde::{Deserialize, Serialize};

/// Grants a client workload access to a server workload.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct AccessPolicy {
    /// Display name.
    pub name: PlanValue<String>,
    /// Whether the policy is enforced.
    pub is_active: PlanValue<bool>,
    /// Resource tags.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub tags: PlanValue<Tags>,
    /// Client workload id.
    #[validate(pattern = "Uuid")]
    pub client_workload: PlanValue<String>,
    /// Server workload id.
    #[validate(pattern = "Uuid")]
    pub server_workload: PlanValue<String>,
    /// Credential providers and how each is mapped onto requests.
    #[validate(with = "plan_guard_rules::unique_mappings", nested)]
    pub credential_providers: PlanValue<Vec<PolicyCredentialProvider>>,
    /// Trust provider ids.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub trust_providers: PlanValue<Vec<String>>,
    /// Access condition ids.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub access_conditions: PlanValue<Vec<String>>,
}

/// A credential provider attached to a policy, with its request mapping.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyCredentialProvider {
    /// Credential provider id.
    #[validate(pattern = "Uuid")]
    pub credential_provider_id: PlanValue<String>,
    /// How the mapping is keyed (`None`, `AccountName`, `HttpHeader`, `HttpBody`).
    pub mapping_type: PlanValue<String>,
    /// Account name to match.
    pub account_name: PlanValue<String>,
    /// Header name to match.
    pub header_name: PlanValue<String>,
    /// Header value to match.
    pub header_value: PlanValue<String>,
    /// JSON path into the request body.
    pub httpbody_field_path: PlanValue<String>,
    /// Value expected at `httpbody_field_path`.
    pub httpbody_field_value: PlanValue<String>,
}

impl CredentialMapping for PolicyCredentialProvider {
    fn account_name(&self) -> Option<&str> {
        self.account_name.as_known_str()
    }

    fn header_name(&self) -> Option<&str> {
        self.header_name.as_known_str()
    }

    fn header_value(&self) -> Option<&str> {
        self.header_value.as_known_str()
    }

    fn body_field_path(&self) -> Option<&str> {
        self.httpbody_field_path.as_known_str()
    }

    fn body_field_value(&self) -> Option<&str> {
        self.httpbody_field_value.as_known_str()
    }
}
