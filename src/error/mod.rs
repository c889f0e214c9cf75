//! Error types for authdeck.

use thiserror::Error;

/// Primary error type for all authdeck operations.
///
/// `Display` for the `Api` variant is the server-provided message alone
/// (or `HTTP <status>` when the body carried none), so workflow code can
/// publish errors to the notification bus without re-formatting.
#[derive(Error, Debug)]
pub enum AuthdeckError {
    /// Non-2xx response. `message` is the decoded `error` field when the
    /// body had one, else the raw body text, else `HTTP <status>`.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Typed payload decoding failed. Raw non-JSON bodies never produce
    /// this; they are wrapped as synthetic `{"error": text}` payloads.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local field validation. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation attempted against state that cannot support it, e.g.
    /// deriving a public key before any JWKS document was loaded.
    #[error("{0}")]
    InvalidState(String),
}

impl AuthdeckError {
    /// Create an API error for a status/message pair.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was produced before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Configuration(_) | Self::InvalidState(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AuthdeckError>;
