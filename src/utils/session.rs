// src/utils/session.rs

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::{
    error::AppError,
    models::user::{PublicUser, User},
    repository::UserRepository,
    state::AppState,
};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "headlight_session";

/// Session key holding the authenticated user's id.
const USER_ID_KEY: &str = "user_id";

/// The authenticated user for the current request.
///
/// Inserted into request extensions by `admin_middleware`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

/// Binds the session to `user_id`, issuing a fresh session id.
pub async fn start_session(session: &Session, user_id: i64) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Destroys the session. A request without one is a no-op.
pub async fn end_session(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Resolves the session to a live user row.
///
/// Returns `None` when there is no session, it expired, or the bound user
/// has since been deleted.
pub async fn current_user(
    session: &Session,
    users: &dyn UserRepository,
) -> Result<Option<User>, AppError> {
    let Some(user_id) = session.get::<i64>(USER_ID_KEY).await? else {
        return Ok(None);
    };

    let user = users.find_by_id(user_id).await?;
    if user.is_none() {
        tracing::debug!(user_id, "session refers to a deleted user");
    }
    Ok(user)
}

/// Axum Middleware: Admin gate.
///
/// Applied once to the whole `/api/admin` group.
/// No valid session: 401. Session user is not an admin: 403.
/// Otherwise injects `CurrentUser` into the request extensions.
pub async fn admin_middleware(
    State(state): State<AppState>,
    session: Session,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = current_user(&session, state.users.as_ref())
        .await?
        .ok_or(AppError::Unauthenticated)?;

    if !user.is_admin {
        tracing::warn!(user_id = user.id, "non-admin user denied access to {}", req.uri().path());
        return Err(AppError::Forbidden);
    }

    req.extensions_mut().insert(CurrentUser(user.into()));
    Ok(next.run(req).await)
}
