// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Usernames are restricted to ASCII letters, digits and underscores.
pub static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex is valid"));

/// The root administrator row. Never deletable.
pub const ROOT_ADMIN_ID: i64 = 1;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique username. Immutable once created.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Display name.
    pub name: String,

    pub is_admin: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The projection of a user that is safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub is_admin: bool,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            is_admin: user.is_admin,
        }
    }
}

/// Row to insert. The password is already hashed by the time this exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub is_admin: bool,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Username is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Password is required."))]
    pub password: String,
}

/// DTO for self-service registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        length(min = 3, max = 50, message = "Username length must be between 3 and 50 characters."),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, digits and underscores.")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "Password length must be between 6 and 100 characters."))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 3, max = 100, message = "Name length must be between 3 and 100 characters."))]
    pub name: String,
}

/// DTO for an admin creating another admin.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(
        length(min = 3, max = 50, message = "Username length must be between 3 and 50 characters."),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, digits and underscores.")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 3, max = 100, message = "Name length must be between 3 and 100 characters."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "Password length must be between 6 and 100 characters."))]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// DTO for updating a user. Fields are optional; `username` is not accepted.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 100, message = "Name length must be between 3 and 100 characters."))]
    pub name: Option<String>,
    #[validate(length(min = 6, max = 100, message = "Password length must be between 6 and 100 characters."))]
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}
