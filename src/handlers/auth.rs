// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    error::AppError,
    models::user::{LoginRequest, PublicUser, RegisterRequest},
    services::auth,
    state::AppState,
    utils::{
        extract::AppJson,
        session::{current_user, end_session, start_session},
    },
};

/// Authenticates a user and starts a session.
///
/// Returns the public projection of the user; the session cookie is set by
/// the session layer.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth::authenticate(state.users.as_ref(), &payload)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::InvalidCredentials) {
                tracing::info!("Failed login attempt for '{}'", payload.username);
            }
        })?;

    start_session(&session, user.id).await?;
    tracing::info!(user_id = user.id, "User '{}' logged in", user.username);

    Ok(Json(PublicUser::from(user)))
}

/// Ends the current session. Succeeds even without one.
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    end_session(&session).await?;
    Ok(Json(json!({ "message": "Logged out" })))
}

/// Returns the user bound to the current session, or 401.
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = current_user(&session, state.users.as_ref())
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(Json(PublicUser::from(user)))
}

/// Registers a new admin user and logs them in.
///
/// Open while no account exists, or when open registration is configured.
/// Returns 201 Created and the public user projection.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !auth::registration_open(state.users.as_ref(), &state.config).await? {
        return Err(AppError::Forbidden);
    }

    let user = auth::register(state.users.as_ref(), payload).await?;
    start_session(&session, user.id).await?;
    tracing::info!(user_id = user.id, "User '{}' registered", user.username);

    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}
