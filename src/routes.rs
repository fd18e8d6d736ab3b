// src/routes.rs

use std::path::PathBuf;

use axum::{
    Router,
    handler::Handler,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, patch, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::{SameSite, time::Duration},
};

use crate::{
    handlers::{admin, auth, contact, site},
    state::AppState,
    utils::session::{SESSION_COOKIE_NAME, admin_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: contact form, login/logout/me/register, health.
/// * Admin routes: contacts triage and user management, behind one gate.
/// * Global middleware: sessions (signed cookie), Trace, CORS.
/// * Falls back to the static front-end build when `STATIC_DIR` is set,
///   resolving `/page` to `page.html`.
pub fn create_router<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let config = &state.config;

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::hours(config.session_ttl_hours)))
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(state.session_key.clone());

    let public_routes = Router::new()
        .route("/health", get(contact::health))
        .route("/contact", post(contact::submit_contact))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/register", post(auth::register));

    let admin_routes = Router::new()
        .route("/contacts", get(admin::list_contacts))
        .route("/contacts/status/{status}", get(admin::list_contacts_by_status))
        .route("/contacts/{id}", get(admin::get_contact))
        .route("/contacts/{id}/status", patch(admin::update_contact_status))
        .route(
            "/contacts/{id}/read-status",
            patch(admin::update_contact_read_state),
        )
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            patch(admin::update_user).delete(admin::delete_user),
        )
        // Single gate for the whole group: session first, then admin flag
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware));

    let mut router = Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes);

    if let Some(dir) = &config.static_dir {
        let pretty_urls = site::pretty_url.with_state(PathBuf::from(dir));
        router = router.fallback_service(ServeDir::new(dir).fallback(pretty_urls));
    }

    router
        // Global Middleware (applied from outside in)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
