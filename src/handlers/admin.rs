// src/handlers/admin.rs

//! Admin console endpoints. Every handler here sits behind `admin_middleware`.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        contact::{ReadStateRequest, UpdateStatusRequest},
        user::{CreateUserRequest, PublicUser, UpdateUserRequest},
    },
    services::{contacts, users},
    state::AppState,
    utils::{
        extract::{AppJson, AppPath},
        session::CurrentUser,
    },
};

/// Lists all contacts, newest first.
pub async fn list_contacts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let contacts = contacts::list(state.contacts.as_ref(), None).await?;
    Ok(Json(contacts))
}

/// Lists contacts with the given status, newest first.
pub async fn list_contacts_by_status(
    State(state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let contacts = contacts::list(state.contacts.as_ref(), Some(&status)).await?;
    Ok(Json(contacts))
}

/// Gets a single contact. Viewing marks it read.
pub async fn get_contact(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let contact = contacts::get_and_mark_read(state.contacts.as_ref(), id).await?;
    Ok(Json(contact))
}

pub async fn update_contact_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact =
        contacts::update_status(state.contacts.as_ref(), id, &payload.status, payload.is_read)
            .await?;
    Ok(Json(contact))
}

pub async fn update_contact_read_state(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ReadStateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = contacts::set_read_state(state.contacts.as_ref(), id, payload.is_read).await?;
    Ok(Json(contact))
}

/// Lists all admin users. Password hashes are never included.
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users: Vec<PublicUser> = users::list(state.users.as_ref())
        .await?
        .into_iter()
        .map(PublicUser::from)
        .collect();

    Ok(Json(users))
}

/// Creates a new admin user. The caller's session is left untouched.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::create(state.users.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

/// Updates a user's name and/or password.
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::update(state.users.as_ref(), id, payload).await?;
    Ok(Json(PublicUser::from(user)))
}

/// Deletes a user by ID.
/// Prevents deleting self and the root administrator.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    users::delete(state.users.as_ref(), caller.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
