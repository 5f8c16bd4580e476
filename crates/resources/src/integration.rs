//! Integrations with external posture services.

use crate::Tags;
use plan_guard_domain::PlanValue;
use plan_guard_shared::SecretString;
use plan_guard_validate_derive::{Normalize, ValidateAttributes};
use serde::{Deserialize, Serialize};

/// A connection to an external service that feeds access conditions.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct Integration {
    /// Display name.
    pub name: PlanValue<String>,
    /// Free-form description.
    pub description: PlanValue<String>,
    /// Whether the integration is enabled.
    pub is_active: PlanValue<bool>,
    /// Resource tags.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub tags: PlanValue<Tags>,
    /// Integration vendor (`CrowdStrike`, `Wiz`).
    pub integration_type: PlanValue<String>,
    /// Sync interval in seconds.
    pub sync_frequency: PlanValue<i64>,
    /// Vendor API endpoint; HTTPS only.
    #[validate(pattern = "SecureUrl")]
    pub endpoint: PlanValue<String>,
    /// Credentials used to call the vendor API.
    #[validate(nested)]
    pub oauth_client_credentials: PlanValue<IntegrationOauth>,
}

/// OAuth client credentials for an integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationOauth {
    /// Token endpoint; HTTPS only.
    #[validate(pattern = "SecureUrl")]
    pub token_url: PlanValue<String>,
    /// Client id.
    pub client_id: PlanValue<String>,
    /// Client secret.
    pub client_secret: PlanValue<SecretString>,
    /// Token audience.
    pub audience: PlanValue<String>,
}
