// src/repository/mod.rs

//! Storage seams for the two tables.
//!
//! Each write touches exactly one row and relies on the backing store's
//! row-level atomicity; no application-level locking is layered on top.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        contact::{Contact, ContactStatus, NewContact},
        user::{NewUser, User},
    },
};

pub use memory::{MemoryContactRepository, MemoryUserRepository};
pub use postgres::{PgContactRepository, PgUserRepository};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Inserts a contact with `pending` status, unread, stamped now.
    async fn create(&self, contact: NewContact) -> Result<Contact, AppError>;

    /// Lists contacts newest-first, optionally filtered by status.
    async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Contact>, AppError>;

    /// Sets the status, and the read flag when given. `None` if the row is missing.
    async fn update_status(
        &self,
        id: i64,
        status: ContactStatus,
        is_read: Option<bool>,
    ) -> Result<Option<Contact>, AppError>;

    async fn set_read(&self, id: i64, is_read: bool) -> Result<Option<Contact>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `UsernameTaken` on a duplicate username.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Updates whichever of name / password hash is given. `None` if the row is missing.
    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, AppError>;

    /// Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
