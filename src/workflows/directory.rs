//! User-account and OAuth-client administration workflows.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::Result;
use crate::list::ListState;
use crate::notify::NotificationBus;
use crate::platform::SecretPrompt;
use crate::types::{
    AccountStatus, CreateClientRequest, CreateUserRequest, OAuthClient, RotatedSecret, User,
};

/// Rows per page in the user and client tables.
pub const DIRECTORY_PAGE_SIZE: usize = 10;

/// State and operations behind the accounts surface.
pub struct DirectoryWorkflows {
    client: ApiClient,
    bus: NotificationBus,
    pub users: ListState<User>,
    pub clients: ListState<OAuthClient>,
}

impl DirectoryWorkflows {
    pub fn new(client: ApiClient, bus: NotificationBus) -> Self {
        Self {
            client,
            bus,
            users: ListState::new(DIRECTORY_PAGE_SIZE),
            clients: ListState::new(DIRECTORY_PAGE_SIZE),
        }
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        self.client.get_json("/users").await
    }

    async fn fetch_clients(&self) -> Result<Vec<OAuthClient>> {
        self.client.get_json("/clients").await
    }

    pub async fn load_users(&mut self) -> bool {
        match self.fetch_users().await {
            Ok(users) => {
                self.users.reload(users);
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    pub async fn load_clients(&mut self) -> bool {
        match self.fetch_clients().await {
            Ok(clients) => {
                self.clients.reload(clients);
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Create a user account and reload the table onto its first page.
    pub async fn create_user(&mut self, request: &CreateUserRequest) -> bool {
        let result: Result<()> = async {
            self.client
                .post("/users", serde_json::to_value(request)?)
                .await?;
            let users = self.fetch_users().await?;
            self.users.reload_first_page(users);
            Ok(())
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success("User created");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Activate or disable a user, then reload in place.
    pub async fn set_user_status(&mut self, user: &User, status: AccountStatus) -> bool {
        let result: Result<()> = async {
            let path = format!("/users/{}/status", user.user_id);
            self.client
                .patch(&path, json!({ "status": status.to_string() }))
                .await?;
            let users = self.fetch_users().await?;
            self.users.reload(users);
            Ok(())
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success(status_message("User", status));
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Reset a user's password with a secret collected through the prompt
    /// capability. A cancelled prompt issues no request and publishes
    /// nothing.
    pub async fn reset_password(&mut self, user: &User, prompt: &dyn SecretPrompt) -> bool {
        let label = format!("Reset password for {}", user.username);
        let Some(password) = prompt.request(&label).await else {
            return false;
        };
        let path = format!("/users/{}/password", user.user_id);
        match self.client.post(&path, json!({ "password": password })).await {
            Ok(_) => {
                self.bus.success("Password reset completed");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Register an OAuth client and reload the table onto its first page.
    pub async fn create_client(&mut self, request: &CreateClientRequest) -> bool {
        let result: Result<()> = async {
            self.client
                .post("/clients", serde_json::to_value(request)?)
                .await?;
            let clients = self.fetch_clients().await?;
            self.clients.reload_first_page(clients);
            Ok(())
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success("Client created");
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Activate or disable a client, then reload in place.
    pub async fn set_client_status(&mut self, client: &OAuthClient, status: AccountStatus) -> bool {
        let result: Result<()> = async {
            let path = format!("/clients/{}/status", client.client_id);
            self.client
                .patch(&path, json!({ "status": status.to_string() }))
                .await?;
            let clients = self.fetch_clients().await?;
            self.clients.reload(clients);
            Ok(())
        }
        .await;
        match result {
            Ok(()) => {
                self.bus.success(status_message("Client", status));
                true
            }
            Err(err) => {
                self.bus.error(err.to_string());
                false
            }
        }
    }

    /// Rotate a client secret. The new secret is returned once for
    /// display/copy and never stored.
    pub async fn rotate_secret(&mut self, client: &OAuthClient) -> Option<RotatedSecret> {
        let path = format!("/clients/{}/secret/rotate", client.client_id);
        match self.client.post_empty_json::<RotatedSecret>(&path).await {
            Ok(rotated) => {
                self.bus.success("Client secret rotated");
                Some(rotated)
            }
            Err(err) => {
                self.bus.error(err.to_string());
                None
            }
        }
    }
}

fn status_message(noun: &str, status: AccountStatus) -> String {
    match status {
        AccountStatus::Active => format!("{noun} activated"),
        AccountStatus::Disabled => format!("{noun} disabled"),
    }
}
