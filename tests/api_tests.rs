// tests/api_tests.rs

use std::sync::Arc;

use headlight_backend::{
    config::Config,
    repository::{MemoryContactRepository, MemoryUserRepository},
    routes,
    services::auth::seed_root_admin,
    state::AppState,
};
use serde_json::{Value, json};
use tower_sessions::MemoryStore;

fn test_config(allow_open_registration: bool) -> Config {
    Config {
        database_url: String::new(),
        session_secret: "integration-test-session-secret-".repeat(3),
        session_ttl_hours: 24,
        cookie_secure: false,
        allow_open_registration,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        static_dir: None,
        rust_log: "error".to_string(),
        admin_username: "admin".to_string(),
        admin_password: Some("admin123".to_string()),
        admin_name: "Administrador".to_string(),
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Uses in-memory storage and sessions; the root admin is seeded when `seed` is set.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(seed: bool, allow_open_registration: bool) -> String {
    let config = test_config(allow_open_registration);
    let contacts = Arc::new(MemoryContactRepository::new());
    let users = Arc::new(MemoryUserRepository::new());

    if seed {
        seed_root_admin(users.as_ref(), &config)
            .await
            .expect("Failed to seed root admin");
    }

    let state = AppState::new(config, contacts, users).expect("Invalid test config");
    let app = routes::create_router(state, MemoryStore::default());

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

async fn login(client: &reqwest::Client, address: &str, username: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/login", address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app(true, false).await;
    let client = client();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_reports_ok() {
    let address = spawn_app(false, false).await;

    let body: Value = client()
        .get(format!("{}/api/health", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn submitted_contact_is_listed_first_as_pending_and_unread() {
    // Arrange
    let address = spawn_app(true, false).await;
    let public = client();
    let admin = client();

    public
        .post(format!("{}/api/contact", address))
        .json(&json!({
            "name": "Bruno",
            "email": "bruno@x.com",
            "phone": "11888888888",
            "message": "Faróis de milha"
        }))
        .send()
        .await
        .unwrap();

    // Act
    let response = public
        .post(format!("{}/api/contact", address))
        .json(&json!({
            "name": "Ana",
            "email": "ana@x.com",
            "phone": "11999999999",
            "message": "Preciso de orçamento"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    let id = body["id"].as_i64().expect("numeric id");

    assert_eq!(login(&admin, &address, "admin", "admin123").await.status().as_u16(), 200);
    let contacts: Vec<Value> = admin
        .get(format!("{}/api/admin/contacts", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["id"], id);
    assert_eq!(contacts[0]["name"], "Ana");
    assert_eq!(contacts[0]["message"], "Preciso de orçamento");
    assert_eq!(contacts[0]["status"], "pending");
    assert_eq!(contacts[0]["isRead"], false);
    assert!(contacts[0]["createdAt"].is_string());
}

#[tokio::test]
async fn invalid_contact_submissions_are_rejected_without_a_record() {
    let address = spawn_app(true, false).await;
    let public = client();

    for email in ["ana.x.com", "ana@", ""] {
        let response = public
            .post(format!("{}/api/contact", address))
            .json(&json!({
                "name": "Ana",
                "email": email,
                "phone": "11999999999",
                "message": "Preciso de orçamento"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400, "email {:?}", email);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errors"][0]["field"], "email");
        assert!(body["message"].is_string());
    }

    // Missing fields are reported field by field.
    let response = public
        .post(format!("{}/api/contact", address))
        .json(&json!({ "email": "ana@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["message", "name", "phone"]);

    let admin = client();
    login(&admin, &address, "admin", "admin123").await;
    let contacts: Vec<Value> = admin
        .get(format!("{}/api/admin/contacts", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(contacts.is_empty());
}

#[tokio::test]
async fn login_failures_look_identical() {
    let address = spawn_app(true, false).await;
    let client = client();

    let wrong_password = login(&client, &address, "admin", "wrongpassword").await;
    let unknown_user = login(&client, &address, "nonexistent", "anything").await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_user.status().as_u16(), 401);

    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_user.json().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn login_me_logout_flow() {
    let address = spawn_app(true, false).await;
    let client = client();

    // No session yet
    let response = client.get(format!("{}/api/me", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Login
    let response = login(&client, &address, "admin", "admin123").await;
    assert_eq!(response.status().as_u16(), 200);
    let logged_in: Value = response.json().await.unwrap();
    assert_eq!(logged_in["id"], 1);
    assert_eq!(logged_in["username"], "admin");
    assert_eq!(logged_in["isAdmin"], true);
    assert!(logged_in.get("password").is_none());

    // Who am I
    let me: Value = client
        .get(format!("{}/api/me", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["id"], logged_in["id"]);
    assert_eq!(me["username"], logged_in["username"]);

    // Logout, twice: the second call has no session and still succeeds
    for _ in 0..2 {
        let response = client
            .post(format!("{}/api/logout", address))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = client.get(format!("{}/api/me", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn first_registration_bootstraps_and_logs_in() {
    // Arrange: empty user table, registration closed by config
    let address = spawn_app(false, false).await;
    let client = client();
    let username = format!("u_{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

    // Act
    let response = client
        .post(format!("{}/api/register", address))
        .json(&json!({
            "username": username,
            "password": "password123",
            "name": "Primeiro Admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["isAdmin"], true);

    let me: Value = client
        .get(format!("{}/api/me", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], username.as_str());

    // Registration is now closed
    let response = client
        .post(format!("{}/api/register", address))
        .json(&json!({
            "username": "second",
            "password": "password123",
            "name": "Segundo Admin"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn open_registration_rejects_taken_usernames() {
    let address = spawn_app(true, true).await;
    let client = client();

    let response = client
        .post(format!("{}/api/register", address))
        .json(&json!({ "username": "admin", "password": "password123", "name": "Impostor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    let response = client
        .post(format!("{}/api/register", address))
        .json(&json!({ "username": "yo", "password": "password123", "name": "Curto" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("{}/api/register", address))
        .json(&json!({ "username": "operador", "password": "password123", "name": "Operador" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
}
