//! Records exchanged with the console backend, plus filter and form types.
//!
//! Server records are pass-through: the runtime only ever interprets
//! status and ID fields for grouping; everything else is carried for
//! display untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use uuid::Uuid;

use bon::Builder;

use crate::ttl::TtlParts;

/// Authenticated admin session, as returned by the session endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

/// Device record backing the "App Devices" table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: Uuid,
    pub device_name: String,
    pub status: String,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

/// One row of the token audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub token_id: Uuid,
    pub source: String,
    pub token: String,
    pub token_sha256: Option<String>,
    pub username: Option<String>,
    pub device_id: Option<Uuid>,
    pub device_name: Option<String>,
    pub client_id: Option<String>,
    pub authorization_id: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub status: String,
}

/// Managed user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub status: String,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

/// Registered OAuth client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OAuthClient {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    #[serde(default)]
    pub grant_types: Vec<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub require_pkce: bool,
    pub status: String,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

/// Internal inbox message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessage {
    pub message_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    pub sender: Option<String>,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub create_at: Option<DateTime<Utc>>,
    pub update_at: Option<DateTime<Utc>>,
}

/// Result of issuing a fresh app access token (and its device binding).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssuedAppToken {
    pub username: String,
    pub device_id: Uuid,
    pub device_name: String,
    pub access_token: String,
    pub access_token_expire_at: DateTime<Utc>,
    pub device_token: String,
}

/// Result of refreshing an app access token from a device token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedAppToken {
    pub device_id: Uuid,
    pub access_token: String,
    pub access_token_expire_at: DateTime<Utc>,
    pub device_token: String,
}

/// Result of rotating a client secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RotatedSecret {
    pub client_id: String,
    pub new_client_secret: String,
}

/// Result of generating a signing key pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// `POST /security/public-key/generate` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPublicKey {
    pub public_key: String,
}

/// `POST /bcrypt/generate` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedBcrypt {
    pub bcrypt: String,
}

/// Lifecycle status shared by user accounts and OAuth clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Disabled,
}

/// JWKS document as served by the backend: `{ "jwks": { "keys": [...] } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JwksDocument {
    #[serde(default)]
    pub jwks: JwkSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JwkSet {
    #[serde(default)]
    pub keys: Vec<Value>,
}

impl JwksDocument {
    /// The first key's `e`/`n` pair, if the set has one.
    pub fn first_rsa_components(&self) -> Option<(&str, &str)> {
        let key = self.jwks.keys.first()?;
        Some((key.get("e")?.as_str()?, key.get("n")?.as_str()?))
    }
}

/// `GET /security/new-device-access` / `PUT` body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceAccess {
    pub allow_new_device_login: bool,
}

/// `GET /inbox/unread-count` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread_count: u64,
}

/// Where an audited token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenSource {
    AppAccess,
    OauthAccess,
    OauthRefresh,
}

/// Status facet of the token audit filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatusFilter {
    All,
    Active,
    Expired,
    Revoked,
}

/// Server-side cap on the token audit fetch size.
pub const MAX_TOKEN_FETCH_LIMIT: u32 = 200;

/// Token audit filter. Owned by the security workflow and applied only on
/// explicit user action, never per keystroke.
#[derive(Debug, Clone, Builder, PartialEq)]
pub struct TokenFilter {
    #[builder(default = TokenFilter::default_sources())]
    pub sources: Vec<TokenSource>,
    #[builder(default = TokenStatusFilter::All)]
    pub status: TokenStatusFilter,
    #[builder(default = 100)]
    pub limit: u32,
}

impl Default for TokenFilter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TokenFilter {
    fn default_sources() -> Vec<TokenSource> {
        vec![
            TokenSource::AppAccess,
            TokenSource::OauthAccess,
            TokenSource::OauthRefresh,
        ]
    }

    /// Query string for `GET /security/tokens`. The limit is clamped into
    /// `[1, 200]`, so an out-of-range value can never reach the server.
    pub fn query_string(&self) -> String {
        let sources = self
            .sources
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let limit = self.limit.clamp(1, MAX_TOKEN_FETCH_LIMIT);
        format!("sources={sources}&status={}&limit={limit}", self.status)
    }
}

/// Form state for issuing an app access token.
#[derive(Debug, Clone)]
pub struct IssueTokenForm {
    pub master_password: String,
    pub device_name: String,
    pub access_ttl: TtlParts,
}

/// Form state for refreshing an app access token.
#[derive(Debug, Clone)]
pub struct RefreshTokenForm {
    pub device_token: String,
    pub access_ttl: TtlParts,
}

/// Fields for creating a user account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub status: String,
}

/// Fields for registering an OAuth client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub client_id: String,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub grant_types: Vec<String>,
    pub redirect_uris: Vec<String>,
    pub scopes: Vec<String>,
    pub require_pkce: bool,
    pub status: String,
}

/// Fields for sending an inbox message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub title: String,
    pub content: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}
