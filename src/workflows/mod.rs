//! Orchestration layer: each workflow validates locally, performs one
//! mutating call, reloads the affected collections from fresh server
//! snapshots, and publishes exactly one outcome notification.
//!
//! Errors never escape a workflow method — they are converted to their
//! human-readable message and published on the bus. Methods take
//! `&mut self`, so a handle cannot overlap its own operations.

pub mod directory;
pub mod inbox;
pub mod security;
pub mod tools;

pub use directory::DirectoryWorkflows;
pub use inbox::InboxWorkflows;
pub use security::SecurityWorkflows;
pub use tools::ToolsWorkflows;

use crate::notify::NotificationBus;
use crate::platform::Clipboard;

/// Copy text through the host clipboard and report the outcome. Shared by
/// every surface that exposes a copy button.
pub async fn copy_text(clipboard: &dyn Clipboard, bus: &NotificationBus, text: &str) -> bool {
    if clipboard.write_text(text).await {
        bus.success("Copied to clipboard");
        true
    } else {
        bus.error("Failed to copy to clipboard");
        false
    }
}
