// src/services/contacts.rs

use validator::Validate;

use crate::{
    error::AppError,
    models::contact::{Contact, ContactStatus, NewContact, SubmitContactRequest},
    repository::ContactRepository,
};

/// Validates and records a public inquiry. Returns the stored contact.
///
/// Fields are trimmed and otherwise stored exactly as submitted; escaping is
/// left to whatever renders them. Markup-only input is rejected.
pub async fn submit(
    contacts: &dyn ContactRepository,
    req: SubmitContactRequest,
) -> Result<Contact, AppError> {
    let req = SubmitContactRequest {
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
        message: req.message.trim().to_string(),
    };
    req.validate()?;

    let contact = contacts
        .create(NewContact {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
        })
        .await?;

    tracing::info!(contact_id = contact.id, "New contact received from {}", contact.email);
    Ok(contact)
}

/// Lists contacts newest-first. `status` is the raw filter from the path.
pub async fn list(
    contacts: &dyn ContactRepository,
    status: Option<&str>,
) -> Result<Vec<Contact>, AppError> {
    let status = status.map(str::parse::<ContactStatus>).transpose()?;
    contacts.list(status).await
}

/// Fetches a contact, marking it read on first view.
pub async fn get_and_mark_read(
    contacts: &dyn ContactRepository,
    id: i64,
) -> Result<Contact, AppError> {
    let contact = contacts.find(id).await?.ok_or_else(|| not_found(id))?;

    if contact.is_read {
        return Ok(contact);
    }

    contacts
        .set_read(id, true)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn update_status(
    contacts: &dyn ContactRepository,
    id: i64,
    status: &str,
    is_read: Option<bool>,
) -> Result<Contact, AppError> {
    let status = status.parse::<ContactStatus>()?;

    let contact = contacts
        .update_status(id, status, is_read)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(contact_id = id, "Contact status set to {}", status);
    Ok(contact)
}

pub async fn set_read_state(
    contacts: &dyn ContactRepository,
    id: i64,
    is_read: bool,
) -> Result<Contact, AppError> {
    contacts
        .set_read(id, is_read)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Contact {} not found", id))
}
