//! Client workloads and the identities that match them.

use crate::Tags;
use plan_guard_domain::{AttributePath, Diagnostics, PlanValue, ValidateAttributes};
use plan_guard_rules::Pattern;
use plan_guard_rules::formats::matches_pattern;
use plan_guard_validate_derive::{Normalize, ValidateAttributes};
use serde::{Deserialize, Serialize};

/// A workload that requests access to servers.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ClientWorkload {
    /// Display name.
    pub name: PlanValue<String>,
    /// Free-form description.
    pub description: PlanValue<String>,
    /// Whether the workload is enabled.
    pub is_active: PlanValue<bool>,
    /// Resource tags.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub tags: PlanValue<Tags>,
    /// Identities that select this client.
    #[validate(nested)]
    pub identities: PlanValue<Vec<ClientIdentity>>,
}

/// One identity selector, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case", deny_unknown_fields)]
pub enum ClientIdentity {
    /// Source IPv4 address.
    SourceIp(PlanValue<String>),
    /// Reported hostname.
    Hostname(PlanValue<String>),
    /// Client id issued by the control plane.
    AembitClientId(PlanValue<String>),
    /// AWS account number.
    AwsAccountId(PlanValue<String>),
    /// OS user owning the process.
    ProcessUserName(PlanValue<String>),
}

impl ClientIdentity {
    /// The identity value.
    pub const fn value(&self) -> &PlanValue<String> {
        match self {
            Self::SourceIp(value)
            | Self::Hostname(value)
            | Self::AembitClientId(value)
            | Self::AwsAccountId(value)
            | Self::ProcessUserName(value) => value,
        }
    }

    const fn pattern(&self) -> Option<Pattern> {
        match self {
            Self::SourceIp(_) => Some(Pattern::HostIp),
            Self::Hostname(_) => Some(Pattern::HostName),
            Self::AembitClientId(_) => Some(Pattern::Uuid),
            Self::AwsAccountId(_) | Self::ProcessUserName(_) => None,
        }
    }
}

impl ValidateAttributes for ClientIdentity {
    fn validate_attributes(&self, path: &AttributePath) -> Diagnostics {
        self.pattern()
            .map(|pattern| matches_pattern(&path.child("value"), self.value(), pattern))
            .unwrap_or_default()
    }
}
