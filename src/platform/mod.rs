//! Host-platform capabilities the workflows depend on.
//!
//! Both are seams: the runtime never talks to a real clipboard or dialog
//! directly, it goes through these traits so hosts (and tests) supply
//! their own.

use async_trait::async_trait;

/// Clipboard write as a fire-and-forget capability. Returns whether the
/// write succeeded; failures carry no further detail.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> bool;
}

/// Collects a secret from the operator through a modal request/response
/// exchange. `None` means the operator cancelled; a cancelled prompt must
/// cause no further action.
#[async_trait]
pub trait SecretPrompt: Send + Sync {
    async fn request(&self, label: &str) -> Option<String>;
}
