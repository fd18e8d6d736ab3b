// src/models/contact.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::{error::AppError, utils::html::is_markup_only};

/// Triage label on a contact. Any state may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 3] = [
        ContactStatus::Pending,
        ContactStatus::InProgress,
        ContactStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::InProgress => "in-progress",
            ContactStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid(
                    "status",
                    "Status must be one of: pending, in-progress, completed",
                )
            })
    }
}

/// A submitted inquiry, as returned to the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: ContactStatus,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Represents the 'contacts' table. `status` is stored as text.
#[derive(Debug, FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = AppError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ContactStatus>().map_err(|_| {
            AppError::InternalServerError(format!(
                "contact {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Contact {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            status,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

/// Fields persisted for a new contact; status, read flag and timestamp are defaulted.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// DTO for the public contact form.
///
/// Missing fields deserialize as empty strings so they surface as field errors.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitContactRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 200, message = "Name is required (at most 200 characters)."),
        custom(function = reject_markup_only)
    )]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 50, message = "Phone is required (at most 50 characters)."),
        custom(function = reject_markup_only)
    )]
    pub phone: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 5000, message = "Message is required (at most 5000 characters)."),
        custom(function = reject_markup_only)
    )]
    pub message: String,
}

/// Rejects text that is nothing but HTML which a sanitizer would remove.
fn reject_markup_only(value: &str) -> Result<(), validator::ValidationError> {
    if is_markup_only(value) {
        return Err(validator::ValidationError::new("markup_only")
            .with_message("Field must contain text, not only markup.".into()));
    }
    Ok(())
}

/// DTO for `PATCH /api/admin/contacts/{id}/status`.
///
/// A missing `status` deserializes as empty and fails the status check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
    pub is_read: Option<bool>,
}

/// DTO for `PATCH /api/admin/contacts/{id}/read-status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadStateRequest {
    pub is_read: bool,
}
