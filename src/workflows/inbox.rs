//! Internal message-inbox workflows.

use serde_json::json;

use crate::client::ApiClient;
use crate::config::AuthdeckConfig;
use crate::error::Result;
use crate::notify::NotificationBus;
use crate::types::{InboxMessage, SendMessageRequest, UnreadCount};

/// State and operations behind the inbox surface.
///
/// The message list carries at most `limit` rows straight from the server
/// (the backend caps the fetch), so it is replaced wholesale rather than
/// paged client-side.
pub struct InboxWorkflows {
    client: ApiClient,
    bus: NotificationBus,
    limit: u32,
    pub messages: Vec<InboxMessage>,
    pub unread_count: u64,
}

impl InboxWorkflows {
    pub fn new(client: ApiClient, bus: NotificationBus, config: &AuthdeckConfig) -> Self {
        Self {
            client,
            bus,
            limit: config.inbox_limit,
            messages: Vec::new(),
            unread_count: 0,
        }
    }

    async fn fetch(&self) -> Result<(Vec<InboxMessage>, UnreadCount)> {
        let list_path = format!("/inbox?limit={}", self.limit);
        tokio::try_join!(
            self.client.get_json::<Vec<InboxMessage>>(&list_path),
            self.client.get_json::<UnreadCount>("/inbox/unread-count"),
        )
    }

    async fn try_reload(&mut self) -> Result<()> {
        let (messages, counter) = self.fetch().await?;
        self.messages = messages;
        self.unread_count = counter.unread_count;
        Ok(())
    }

    /// Load the message list and unread counter concurrently.
    pub async fn load(&mut self) -> bool {
        match self.try_reload().await {
            Ok(()) => true,
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Send a message into the inbox, then reload.
    pub async fn send(&mut self, request: &SendMessageRequest) -> bool {
        let result: Result<()> = async {
            self.client
                .post("/inbox/send", serde_json::to_value(request)?)
                .await?;
            self.try_reload().await
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success("Message sent to inbox");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Mark one message read, then reload.
    pub async fn mark_read(&mut self, message: &InboxMessage) -> bool {
        let result: Result<()> = async {
            let body = json!({ "messageIds": [message.message_id] });
            self.client.post("/inbox/read", body).await?;
            self.try_reload().await
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success("Message marked as read");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Mark everything read, then reload.
    pub async fn mark_all_read(&mut self) -> bool {
        let result: Result<()> = async {
            self.client.post_empty("/inbox/read-all").await?;
            self.try_reload().await
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success("All messages marked as read");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }
}
