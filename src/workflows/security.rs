//! Token-lifecycle workflows: issue, refresh, revoke, audit filtering,
//! JWKS material and the new-device-access switch.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::config::AuthdeckConfig;
use crate::error::{AuthdeckError, Result};
use crate::list::ListState;
use crate::notify::NotificationBus;
use crate::types::{
    Device, GeneratedPublicKey, IssueTokenForm, IssuedAppToken, JwksDocument, NewDeviceAccess,
    RefreshTokenForm, RefreshedAppToken, TokenFilter, TokenRecord,
};

/// State and operations behind the security surface.
///
/// Holds the device table, the token audit table, the active filter and
/// the signing-key material. All list state is derived from full server
/// reloads; nothing is patched locally.
pub struct SecurityWorkflows {
    client: ApiClient,
    bus: NotificationBus,
    pub devices: ListState<Device>,
    pub tokens: ListState<TokenRecord>,
    pub filter: TokenFilter,
    pub jwks: Option<JwksDocument>,
    pub generated_public_key: Option<String>,
    pub new_device_access: bool,
    pub last_issued: Option<IssuedAppToken>,
    pub last_refreshed: Option<RefreshedAppToken>,
}

impl SecurityWorkflows {
    pub fn new(client: ApiClient, bus: NotificationBus, config: &AuthdeckConfig) -> Self {
        Self {
            client,
            bus,
            devices: ListState::new(config.device_page_size),
            tokens: ListState::new(config.token_page_size),
            filter: TokenFilter::default(),
            jwks: None,
            generated_public_key: None,
            new_device_access: false,
            last_issued: None,
            last_refreshed: None,
        }
    }

    async fn fetch_devices(&self) -> Result<Vec<Device>> {
        self.client.get_json("/security/app-devices").await
    }

    async fn fetch_tokens(&self) -> Result<Vec<TokenRecord>> {
        let path = format!("/security/tokens?{}", self.filter.query_string());
        self.client.get_json(&path).await
    }

    /// Reload both tables from fresh snapshots after a membership change,
    /// landing each on its first page.
    async fn reload_after_mutation(&mut self) -> Result<()> {
        let (devices, tokens) = tokio::try_join!(self.fetch_devices(), self.fetch_tokens())?;
        self.devices.reload_first_page(devices);
        self.tokens.reload_first_page(tokens);
        Ok(())
    }

    /// Initial load of the whole surface: JWKS, devices, tokens and the
    /// new-device-access flag, fetched concurrently.
    pub async fn load_all(&mut self) -> bool {
        let loaded = tokio::try_join!(
            self.client.get_json::<JwksDocument>("/security/jwks"),
            self.fetch_devices(),
            self.fetch_tokens(),
            self.client
                .get_json::<NewDeviceAccess>("/security/new-device-access"),
        );
        match loaded {
            Ok((jwks, devices, tokens, access)) => {
                self.jwks = Some(jwks);
                self.devices.reload(devices);
                self.tokens.reload(tokens);
                self.new_device_access = access.allow_new_device_login;
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Issue a fresh app access token (creating or rebinding a device).
    pub async fn issue_token(&mut self, form: &IssueTokenForm) -> Option<IssuedAppToken> {
        match self.try_issue_token(form).await {
            Ok(issued) => {
                self.bus.success("Issued app access token successfully");
                Some(issued)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }

    async fn try_issue_token(&mut self, form: &IssueTokenForm) -> Result<IssuedAppToken> {
        let ttl = form.access_ttl.to_seconds()?;
        let body = json!({
            "masterPassword": form.master_password,
            "deviceName": form.device_name,
            "accessTtlSeconds": ttl,
        });
        let issued: IssuedAppToken = self
            .client
            .post_json("/security/app-tokens/issue", body)
            .await?;
        debug!(device = %issued.device_id, ttl, "issued app token");
        self.reload_after_mutation().await?;
        self.last_issued = Some(issued.clone());
        Ok(issued)
    }

    /// Mint a new access token from an existing device token.
    pub async fn refresh_token(&mut self, form: &RefreshTokenForm) -> Option<RefreshedAppToken> {
        match self.try_refresh_token(form).await {
            Ok(refreshed) => {
                self.bus.success("Refreshed app access token successfully");
                Some(refreshed)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }

    async fn try_refresh_token(&mut self, form: &RefreshTokenForm) -> Result<RefreshedAppToken> {
        let ttl = form.access_ttl.to_seconds()?;
        let body = json!({
            "deviceToken": form.device_token,
            "accessTtlSeconds": ttl,
        });
        let refreshed: RefreshedAppToken = self
            .client
            .post_json("/security/app-tokens/refresh", body)
            .await?;
        debug!(device = %refreshed.device_id, ttl, "refreshed app token");
        self.reload_after_mutation().await?;
        self.last_refreshed = Some(refreshed.clone());
        Ok(refreshed)
    }

    /// Revoke a device and every token hanging off it.
    pub async fn revoke_device(&mut self, device: &Device) -> bool {
        let result: Result<()> = async {
            let path = format!("/security/app-devices/{}/revoke", device.device_id);
            self.client.post_empty(&path).await?;
            self.reload_after_mutation().await
        }
        .await;
        match result {
            Ok(()) => {
                self.bus
                    .success(format!("Device revoked: {}", device.device_name));
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Replace the audit filter and reload the token table under it.
    pub async fn apply_filter(&mut self, filter: TokenFilter) -> bool {
        self.filter = filter;
        match self.fetch_tokens().await {
            Ok(tokens) => {
                self.tokens.reload_first_page(tokens);
                self.bus.success("Token filter applied");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Re-fetch the device table, keeping the current page (clamped).
    pub async fn refresh_devices(&mut self) -> bool {
        match self.fetch_devices().await {
            Ok(devices) => {
                self.devices.reload(devices);
                self.bus.success("App devices refreshed");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Re-fetch the token audit under the current filter, keeping the
    /// current page (clamped).
    pub async fn refresh_tokens(&mut self) -> bool {
        match self.fetch_tokens().await {
            Ok(tokens) => {
                self.tokens.reload(tokens);
                self.bus.success("Token audit refreshed");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Open or close first-time device onboarding.
    pub async fn set_new_device_access(&mut self, allow: bool) -> bool {
        let body = json!({ "allowNewDeviceLogin": allow });
        match self
            .client
            .put_json::<NewDeviceAccess>("/security/new-device-access", body)
            .await
        {
            Ok(access) => {
                self.new_device_access = access.allow_new_device_login;
                let label = if access.allow_new_device_login {
                    "enabled"
                } else {
                    "disabled"
                };
                self.bus.success(format!("New device access {label}"));
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Derive a PEM public key from the first key of the cached JWKS.
    pub async fn generate_public_key_from_jwks(&mut self) -> Option<String> {
        match self.try_generate_public_key().await {
            Ok(key) => {
                self.generated_public_key = Some(key.clone());
                self.bus.success("Generated public key successfully");
                Some(key)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }

    async fn try_generate_public_key(&self) -> Result<String> {
        let (e, n) = self
            .jwks
            .as_ref()
            .and_then(JwksDocument::first_rsa_components)
            .ok_or_else(|| AuthdeckError::InvalidState("No JWK key found".to_string()))?;
        let body = json!({ "e": e, "n": n });
        let generated: GeneratedPublicKey = self
            .client
            .post_json("/security/public-key/generate", body)
            .await?;
        Ok(generated.public_key)
    }
}
