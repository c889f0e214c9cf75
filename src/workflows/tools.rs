//! Standalone security tools: bcrypt hashing and key generation.

use serde_json::json;

use crate::client::ApiClient;
use crate::notify::NotificationBus;
use crate::types::{GeneratedBcrypt, GeneratedKeyPair, GeneratedPublicKey};

/// Operations behind the tools surface. Stateless beyond its
/// collaborators; generated material is returned to the caller.
pub struct ToolsWorkflows {
    client: ApiClient,
    bus: NotificationBus,
}

impl ToolsWorkflows {
    pub fn new(client: ApiClient, bus: NotificationBus) -> Self {
        Self { client, bus }
    }

    /// Hash a password server-side.
    pub async fn generate_bcrypt(&mut self, password: &str) -> Option<String> {
        let body = json!({ "password": password });
        match self
            .client
            .post_json::<GeneratedBcrypt>("/bcrypt/generate", body)
            .await
        {
            Ok(generated) => {
                self.bus.success("Generated bcrypt successfully");
                Some(generated.bcrypt)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }

    /// Derive a PEM public key from raw RSA components.
    pub async fn generate_public_key(&mut self, e: &str, n: &str) -> Option<String> {
        let body = json!({ "e": e, "n": n });
        match self
            .client
            .post_json::<GeneratedPublicKey>("/security/public-key/generate", body)
            .await
        {
            Ok(generated) => {
                self.bus.success("Generated public key successfully");
                Some(generated.public_key)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }

    /// Generate a fresh signing key pair server-side.
    pub async fn generate_key_pair(&mut self) -> Option<GeneratedKeyPair> {
        match self
            .client
            .post_empty_json::<GeneratedKeyPair>("/security/key-pair/generate")
            .await
        {
            Ok(pair) => {
                self.bus.success("Generated key pair successfully");
                Some(pair)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }
}
