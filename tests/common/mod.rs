//! Shared test helpers: notification recording, capability doubles and
//! canned server payloads.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::MockServer;

use authdeck::client::ApiClient;
use authdeck::config::AuthdeckConfig;
use authdeck::notify::{NotificationBus, NotificationItem, NotificationLevel, Subscription};
use authdeck::platform::{Clipboard, SecretPrompt};

/// Config pointing at a mock server, short timeout.
pub fn test_config(server: &MockServer) -> AuthdeckConfig {
    let mut config = AuthdeckConfig::new(server.uri());
    config.request_timeout = std::time::Duration::from_secs(5);
    config
}

pub fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&test_config(server)).expect("client should build")
}

/// Captures every notification published on a bus.
pub struct Recorder {
    items: Arc<Mutex<Vec<NotificationItem>>>,
    _subscription: Subscription,
}

impl Recorder {
    pub fn attach(bus: &NotificationBus) -> Self {
        let items: Arc<Mutex<Vec<NotificationItem>>> = Arc::default();
        let sink = Arc::clone(&items);
        let subscription = bus.subscribe(move |item| sink.lock().unwrap().push(item.clone()));
        Self {
            items,
            _subscription: subscription,
        }
    }

    pub fn items(&self) -> Vec<NotificationItem> {
        self.items.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.items().into_iter().map(|item| item.message).collect()
    }

    pub fn levels(&self) -> Vec<NotificationLevel> {
        self.items().into_iter().map(|item| item.level).collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

/// Clipboard double; records writes and answers with a fixed outcome.
pub struct RecordingClipboard {
    accept: bool,
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> bool {
        self.writes.lock().unwrap().push(text.to_string());
        self.accept
    }
}

/// Prompt double returning a canned reply (`None` = operator cancelled).
pub struct CannedPrompt {
    reply: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl CannedPrompt {
    pub fn answering(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretPrompt for CannedPrompt {
    async fn request(&self, label: &str) -> Option<String> {
        self.requests.lock().unwrap().push(label.to_string());
        self.reply.clone()
    }
}

pub fn device_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn device_json(n: u128, status: &str) -> Value {
    json!({
        "deviceId": device_id(n),
        "deviceName": format!("device-{n}"),
        "status": status,
        "lastSeenAt": "2026-08-01T10:00:00Z",
        "revokedAt": null,
        "createAt": "2026-07-01T09:00:00Z",
        "updateAt": "2026-08-01T10:00:00Z"
    })
}

pub fn devices_json(count: u128) -> Value {
    Value::Array((0..count).map(|n| device_json(n, "ACTIVE")).collect())
}

pub fn token_json(n: u128, status: &str) -> Value {
    json!({
        "tokenId": Uuid::from_u128(0x1000 + n),
        "source": "APP_ACCESS",
        "token": format!("tok-{n}-{}", "x".repeat(32)),
        "tokenSha256": null,
        "username": "admin",
        "deviceId": device_id(n),
        "deviceName": format!("device-{n}"),
        "clientId": null,
        "authorizationId": null,
        "issuedAt": "2026-08-01T10:00:00Z",
        "expiresAt": "2026-08-01T11:00:00Z",
        "revokedAt": null,
        "status": status
    })
}

pub fn tokens_json(count: u128) -> Value {
    Value::Array((0..count).map(|n| token_json(n, "ACTIVE")).collect())
}

pub fn jwks_json() -> Value {
    json!({
        "jwks": {
            "keys": [{ "kty": "RSA", "kid": "key-1", "e": "AQAB", "n": "sample-modulus" }]
        }
    })
}

pub fn issued_token_json() -> Value {
    json!({
        "username": "admin",
        "deviceId": device_id(99),
        "deviceName": "Admin Console Device",
        "accessToken": "access-token-value",
        "accessTokenExpireAt": "2026-08-05T12:00:00Z",
        "deviceToken": "device-token-value"
    })
}

pub fn refreshed_token_json() -> Value {
    json!({
        "deviceId": device_id(99),
        "accessToken": "refreshed-access-token",
        "accessTokenExpireAt": "2026-08-05T12:00:00Z",
        "deviceToken": "rotated-device-token"
    })
}

pub fn user_json(n: u128, status: &str) -> Value {
    json!({
        "userId": Uuid::from_u128(0x100 + n),
        "username": format!("user-{n}"),
        "displayName": format!("User {n}"),
        "status": status,
        "createAt": "2026-07-01T09:00:00Z",
        "updateAt": "2026-08-01T10:00:00Z"
    })
}

pub fn users_json(count: u128) -> Value {
    Value::Array((0..count).map(|n| user_json(n, "ACTIVE")).collect())
}

pub fn client_json(n: u128, status: &str) -> Value {
    json!({
        "id": format!("{n}"),
        "clientId": format!("client-{n}"),
        "clientName": format!("Client {n}"),
        "grantTypes": ["authorization_code", "refresh_token"],
        "redirectUris": ["https://app.example/callback"],
        "scopes": ["openid", "profile"],
        "requirePkce": true,
        "status": status,
        "createAt": "2026-07-01T09:00:00Z",
        "updateAt": "2026-08-01T10:00:00Z"
    })
}

pub fn clients_json(count: u128) -> Value {
    Value::Array((0..count).map(|n| client_json(n, "ACTIVE")).collect())
}

pub fn inbox_message_json(n: u128, read: bool) -> Value {
    json!({
        "messageId": Uuid::from_u128(0x200 + n),
        "title": format!("Notice {n}"),
        "content": "body text",
        "type": "SYSTEM",
        "sender": "system",
        "payload": {},
        "read": read,
        "readAt": null,
        "createAt": "2026-08-01T10:00:00Z",
        "updateAt": "2026-08-01T10:00:00Z"
    })
}

pub fn inbox_json(count: u128) -> Value {
    Value::Array((0..count).map(|n| inbox_message_json(n, false)).collect())
}
