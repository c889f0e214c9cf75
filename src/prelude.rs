//! Convenience re-exports for common use.

pub use crate::client::ApiClient;
pub use crate::config::AuthdeckConfig;
pub use crate::error::{AuthdeckError, Result};
pub use crate::list::ListState;
pub use crate::notify::{NotificationBus, NotificationFeed, NotificationItem, NotificationLevel};
pub use crate::platform::{Clipboard, SecretPrompt};
pub use crate::session::{SessionManager, SessionState};
pub use crate::ttl::TtlParts;
pub use crate::types::{
    AccountStatus, Device, IssueTokenForm, IssuedAppToken, RefreshTokenForm, RefreshedAppToken,
    Session, TokenFilter, TokenRecord, TokenSource, TokenStatusFilter,
};
pub use crate::workflows::{
    DirectoryWorkflows, InboxWorkflows, SecurityWorkflows, ToolsWorkflows,
};
