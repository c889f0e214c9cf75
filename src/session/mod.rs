//! Authenticated-session state and lifecycle.

use serde_json::json;
use tracing::warn;

use crate::client::ApiClient;
use crate::error::Result;
use crate::notify::NotificationBus;
use crate::types::Session;

/// Where the manager currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// From construction until the first bootstrap probe resolves.
    Loading,
    Authenticated(Session),
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Owns the session value: bootstraps it once, exposes refresh/clear and
/// the login/logout transitions. The session is never partially mutated —
/// every change is a full replace or a drop to `Anonymous`.
pub struct SessionManager {
    client: ApiClient,
    bus: NotificationBus,
    state: SessionState,
    bootstrapped: bool,
}

impl SessionManager {
    pub fn new(client: ApiClient, bus: NotificationBus) -> Self {
        Self {
            client,
            bus,
            state: SessionState::Loading,
            bootstrapped: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Probe `/session/me` exactly once per manager lifetime; later calls
    /// return the held state without a request. Probe failures of any kind
    /// mean `Anonymous` and are never surfaced.
    pub async fn bootstrap(&mut self) -> &SessionState {
        if self.bootstrapped {
            return &self.state;
        }
        self.bootstrapped = true;
        self.probe().await;
        &self.state
    }

    /// Re-probe the session endpoint, replacing the state wholesale.
    pub async fn refresh(&mut self) -> &SessionState {
        self.probe().await;
        &self.state
    }

    async fn probe(&mut self) {
        match self.client.get_json::<Session>("/session/me").await {
            Ok(session) => self.state = SessionState::Authenticated(session),
            Err(err) => {
                warn!(error = %err, "session probe failed, treating as anonymous");
                self.state = SessionState::Anonymous;
            }
        }
    }

    /// Authenticate. On success the new session replaces the state and a
    /// success notification is published; on failure `Sign in failed` is
    /// published and the error returned for inline display.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let body = json!({ "username": username, "password": password });
        match self.client.post_json::<Session>("/session/login", body).await {
            Ok(session) => {
                self.state = SessionState::Authenticated(session.clone());
                self.bus.success("Signed in successfully");
                Ok(session)
            }
            Err(err) => {
                self.bus.error("Sign in failed");
                Err(err)
            }
        }
    }

    /// Call the logout endpoint, then clear local state unconditionally —
    /// a backend failure is reported through the bus but never blocks
    /// leaving protected views.
    pub async fn logout(&mut self) {
        let result = self.client.post_empty("/session/logout").await;
        self.state = SessionState::Anonymous;
        match result {
            Ok(_) => {
                self.bus.success("Signed out");
            }
            Err(err) => {
                warn!(error = %err, "logout call failed, local session cleared anyway");
                self.bus.error(err.to_string());
            }
        }
    }

    /// Drop to `Anonymous` locally without a network call.
    pub fn clear(&mut self) {
        self.state = SessionState::Anonymous;
    }
}
