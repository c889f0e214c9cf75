//! User and OAuth-client administration workflows.

mod common;

use authdeck::notify::{NotificationBus, NotificationLevel};
use authdeck::types::{AccountStatus, CreateClientRequest, CreateUserRequest};
use authdeck::workflows::DirectoryWorkflows;
use common::{
    client_json, clients_json, test_client, user_json, users_json, CannedPrompt, Recorder,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn workflows(server: &MockServer, bus: &NotificationBus) -> DirectoryWorkflows {
    DirectoryWorkflows::new(test_client(server), bus.clone())
}

async fn mount_user_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_client_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_user_reloads_onto_the_first_page() {
    let server = MockServer::start().await;
    mount_user_list(&server, users_json(25)).await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "username": "new-operator",
            "password": "initial-secret",
            "displayName": "New Operator",
            "status": "ACTIVE"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(25, "ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let mut directory = workflows(&server, &bus);
    directory.load_users().await;
    directory.users.next_page();
    assert_eq!(directory.users.page(), 2);

    let recorder = Recorder::attach(&bus);
    let request = CreateUserRequest {
        username: "new-operator".to_string(),
        password: "initial-secret".to_string(),
        display_name: "New Operator".to_string(),
        status: "ACTIVE".to_string(),
    };
    assert!(directory.create_user(&request).await);

    assert_eq!(directory.users.page(), 1);
    assert_eq!(recorder.messages(), vec!["User created"]);
    assert_eq!(recorder.levels(), vec![NotificationLevel::Success]);
}

#[tokio::test]
async fn set_user_status_patches_and_reloads_in_place() {
    let server = MockServer::start().await;
    mount_user_list(&server, users_json(25)).await;
    let user: authdeck::types::User =
        serde_json::from_value(user_json(3, "ACTIVE")).expect("user");
    Mock::given(method("PATCH"))
        .and(path(format!("/users/{}/status", user.user_id)))
        .and(body_json(json!({ "status": "DISABLED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(3, "DISABLED")))
        .expect(1)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let mut directory = workflows(&server, &bus);
    directory.load_users().await;
    directory.users.next_page();

    let recorder = Recorder::attach(&bus);
    assert!(directory.set_user_status(&user, AccountStatus::Disabled).await);

    // In-place mutation keeps the page (still valid for 25 rows).
    assert_eq!(directory.users.page(), 2);
    assert_eq!(recorder.messages(), vec!["User disabled"]);
}

#[tokio::test]
async fn cancelled_password_prompt_issues_no_request() {
    let server = MockServer::start().await;
    let user: authdeck::types::User =
        serde_json::from_value(user_json(1, "ACTIVE")).expect("user");
    Mock::given(method("POST"))
        .and(path(format!("/users/{}/password", user.user_id)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let recorder = Recorder::attach(&bus);
    let mut directory = workflows(&server, &bus);

    let prompt = CannedPrompt::cancelled();
    assert!(!directory.reset_password(&user, &prompt).await);

    assert_eq!(prompt.requests(), vec!["Reset password for user-1"]);
    assert_eq!(recorder.len(), 0);
}

#[tokio::test]
async fn password_reset_posts_the_collected_secret() {
    let server = MockServer::start().await;
    let user: authdeck::types::User =
        serde_json::from_value(user_json(1, "ACTIVE")).expect("user");
    Mock::given(method("POST"))
        .and(path(format!("/users/{}/password", user.user_id)))
        .and(body_json(json!({ "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let recorder = Recorder::attach(&bus);
    let mut directory = workflows(&server, &bus);

    let prompt = CannedPrompt::answering("hunter2");
    assert!(directory.reset_password(&user, &prompt).await);
    assert_eq!(recorder.messages(), vec!["Password reset completed"]);
}

#[tokio::test]
async fn create_client_reloads_onto_the_first_page() {
    let server = MockServer::start().await;
    mount_client_list(&server, clients_json(12)).await;
    Mock::given(method("POST"))
        .and(path("/clients"))
        .and(body_partial_json(json!({
            "clientId": "portal",
            "clientName": "Customer Portal",
            "requirePkce": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(client_json(12, "ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let mut directory = workflows(&server, &bus);
    directory.load_clients().await;
    directory.clients.next_page();

    let recorder = Recorder::attach(&bus);
    let request = CreateClientRequest {
        client_id: "portal".to_string(),
        client_name: "Customer Portal".to_string(),
        client_secret: None,
        grant_types: vec!["authorization_code".to_string()],
        redirect_uris: vec!["https://portal.example/cb".to_string()],
        scopes: vec!["openid".to_string()],
        require_pkce: true,
        status: "ACTIVE".to_string(),
    };
    assert!(directory.create_client(&request).await);

    assert_eq!(directory.clients.page(), 1);
    assert_eq!(recorder.messages(), vec!["Client created"]);
}

#[tokio::test]
async fn set_client_status_activates_with_its_own_message() {
    let server = MockServer::start().await;
    mount_client_list(&server, clients_json(2)).await;
    let client: authdeck::types::OAuthClient =
        serde_json::from_value(client_json(1, "DISABLED")).expect("client");
    Mock::given(method("PATCH"))
        .and(path("/clients/client-1/status"))
        .and(body_json(json!({ "status": "ACTIVE" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json(1, "ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let recorder = Recorder::attach(&bus);
    let mut directory = workflows(&server, &bus);

    assert!(directory.set_client_status(&client, AccountStatus::Active).await);
    assert_eq!(recorder.messages(), vec!["Client activated"]);
}

#[tokio::test]
async fn rotate_secret_returns_the_new_secret_once() {
    let server = MockServer::start().await;
    let client: authdeck::types::OAuthClient =
        serde_json::from_value(client_json(1, "ACTIVE")).expect("client");
    Mock::given(method("POST"))
        .and(path("/clients/client-1/secret/rotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clientId": "client-1",
            "newClientSecret": "s3cr3t-rotated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let recorder = Recorder::attach(&bus);
    let mut directory = workflows(&server, &bus);

    let rotated = directory.rotate_secret(&client).await.expect("rotated");
    assert_eq!(rotated.new_client_secret, "s3cr3t-rotated");
    assert_eq!(recorder.messages(), vec!["Client secret rotated"]);
}

#[tokio::test]
async fn load_failure_surfaces_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "directory offline" })))
        .mount(&server)
        .await;

    let bus = NotificationBus::new();
    let recorder = Recorder::attach(&bus);
    let mut directory = workflows(&server, &bus);

    assert!(!directory.load_users().await);
    assert_eq!(recorder.messages(), vec!["directory offline"]);
    assert_eq!(recorder.levels(), vec![NotificationLevel::Error]);
}
