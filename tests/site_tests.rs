// tests/site_tests.rs

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::Request,
};
use headlight_backend::{
    config::Config,
    repository::{MemoryContactRepository, MemoryUserRepository},
    routes,
    state::AppState,
};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

/// Builds the router serving `dir` as the static front-end.
fn app_with_static_dir(dir: &std::path::Path) -> axum::Router {
    let config = Config {
        database_url: String::new(),
        session_secret: "static-site-test-session-secret-".repeat(2),
        session_ttl_hours: 24,
        cookie_secure: false,
        allow_open_registration: false,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origins: Vec::new(),
        static_dir: Some(dir.to_string_lossy().into_owned()),
        rust_log: "error".to_string(),
        admin_username: "admin".to_string(),
        admin_password: None,
        admin_name: "Administrador".to_string(),
    };

    let state = AppState::new(
        config,
        Arc::new(MemoryContactRepository::new()),
        Arc::new(MemoryUserRepository::new()),
    )
    .unwrap();

    routes::create_router(state, MemoryStore::default())
}

async fn get(app: axum::Router, uri: &str) -> (u16, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn static_pages_resolve_pretty_urls() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "home").unwrap();
    std::fs::write(dir.path().join("contato.html"), "contato").unwrap();
    std::fs::write(dir.path().join("style.css"), "body {}").unwrap();
    let app = app_with_static_dir(dir.path());

    // Act + Assert
    assert_eq!(get(app.clone(), "/").await, (200, "home".to_string()));
    assert_eq!(get(app.clone(), "/contato").await, (200, "contato".to_string()));
    assert_eq!(get(app.clone(), "/contato.html").await, (200, "contato".to_string()));
    assert_eq!(get(app.clone(), "/style.css").await, (200, "body {}".to_string()));

    assert_eq!(get(app.clone(), "/quem-somos").await.0, 404);
    assert_eq!(get(app.clone(), "/missing.js").await.0, 404);

    // API routes still win over the static fallback
    let (status, body) = get(app, "/api/health").await;
    assert_eq!(status, 200);
    assert!(body.contains("ok"));
}
