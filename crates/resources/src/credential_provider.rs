//! Credential providers.
//!
//! A provider has exactly one kind; the kinds are a tagged union so that
//! "exactly one populated" holds by construction.

use crate::Tags;
use plan_guard_domain::PlanValue;
use plan_guard_shared::SecretString;
use plan_guard_validate_derive::{Normalize, ValidateAttributes};
use serde::{Deserialize, Serialize};

/// Issues credentials to client workloads.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialProvider {
    /// Display name.
    pub name: PlanValue<String>,
    /// Free-form description.
    pub description: PlanValue<String>,
    /// Whether the provider is enabled.
    pub is_active: PlanValue<bool>,
    /// Resource tags.
    #[normalize(with = "plan_guard_rules::empty_default")]
    pub tags: PlanValue<Tags>,
    /// Provider-specific settings.
    #[validate(nested)]
    #[normalize(nested)]
    pub kind: PlanValue<CredentialProviderKind>,
}

/// The provider kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialProviderKind {
    /// Key-pair JWT for Snowflake.
    SnowflakeJwt(SnowflakeJwt),
    /// OAuth 2.0 client credentials grant.
    OauthClientCredentials(OauthClientCredentials),
    /// OAuth 2.0 authorization code grant.
    OauthAuthorizationCode(OauthAuthorizationCode),
    /// Google workload identity federation.
    GoogleWorkloadIdentity(GoogleWorkloadIdentity),
    /// AWS STS federation.
    AwsSts(AwsSts),
    /// Static API key.
    ApiKey(ApiKey),
    /// Static username and password.
    UsernamePassword(UsernamePassword),
    /// Vault client token.
    VaultClientToken(VaultClientToken),
}

/// Snowflake key-pair JWT settings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct SnowflakeJwt {
    /// Account locator.
    #[validate(pattern = "SnowflakeAccount")]
    pub account_id: PlanValue<String>,
    /// Login name.
    #[validate(pattern = "SnowflakeUserName")]
    pub username: PlanValue<String>,
}

/// OAuth client credentials settings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct OauthClientCredentials {
    /// Token endpoint; HTTPS only.
    #[validate(pattern = "SecureUrl")]
    pub token_url: PlanValue<String>,
    /// Client id.
    pub client_id: PlanValue<String>,
    /// Client secret.
    pub client_secret: PlanValue<SecretString>,
    /// Requested scopes, space separated.
    pub scopes: PlanValue<String>,
}

/// OAuth authorization code settings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct OauthAuthorizationCode {
    /// Authorization server base URL.
    #[validate(pattern = "UrlScheme")]
    pub oauth_url: PlanValue<String>,
    /// Client id.
    pub client_id: PlanValue<String>,
    /// Client secret.
    pub client_secret: PlanValue<SecretString>,
    /// Requested scopes, space separated.
    pub scopes: PlanValue<String>,
}

/// Google workload identity settings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct GoogleWorkloadIdentity {
    /// Token audience.
    pub audience: PlanValue<String>,
    /// Service account to impersonate.
    #[validate(pattern = "Email")]
    pub service_account: PlanValue<String>,
    /// Token lifetime in seconds.
    pub lifetime: PlanValue<i64>,
}

/// AWS STS federation settings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct AwsSts {
    /// Role to assume.
    pub role_arn: PlanValue<String>,
    /// Session lifetime in seconds.
    pub lifetime: PlanValue<i64>,
    /// Inline session policy document.
    #[normalize(with = "plan_guard_rules::canonical_json")]
    pub session_policy: PlanValue<String>,
}

/// Static API key.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ApiKey {
    /// The key.
    pub api_key: PlanValue<SecretString>,
}

/// Static username and password.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct UsernamePassword {
    /// Username.
    pub username: PlanValue<String>,
    /// Password.
    pub password: PlanValue<SecretString>,
}

/// Vault client token settings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValidateAttributes, Normalize,
)]
#[serde(default, deny_unknown_fields)]
pub struct VaultClientToken {
    /// Vault server hostname.
    #[validate(pattern = "HostName")]
    pub vault_host: PlanValue<String>,
    /// Vault server port.
    pub vault_port: PlanValue<i64>,
    /// Whether to use TLS.
    pub vault_tls: PlanValue<bool>,
}
