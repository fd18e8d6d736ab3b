// src/handlers/contact.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    models::contact::SubmitContactRequest,
    services::contacts,
    state::AppState,
    utils::extract::AppJson,
};

/// Public contact form submission.
/// Returns 201 Created with the new contact id.
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = contacts::submit(state.contacts.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": contact.id,
            "message": "Message sent successfully"
        })),
    ))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
