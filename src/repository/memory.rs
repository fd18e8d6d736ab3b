// src/repository/memory.rs

//! In-process repositories backed by `tokio::sync::RwLock`.
//! Used by the integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ContactRepository, UserRepository};
use crate::{
    error::AppError,
    models::{
        contact::{Contact, ContactStatus, NewContact},
        user::{NewUser, User},
    },
};

#[derive(Debug)]
pub struct MemoryContactRepository {
    contacts: RwLock<Vec<Contact>>,
    next_id: AtomicI64,
}

impl Default for MemoryContactRepository {
    fn default() -> Self {
        Self {
            contacts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn create(&self, contact: NewContact) -> Result<Contact, AppError> {
        let contact = Contact {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            status: ContactStatus::Pending,
            is_read: false,
            created_at: Utc::now(),
        };
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }

    async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, AppError> {
        let mut contacts: Vec<Contact> = self
            .contacts
            .read()
            .await
            .iter()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(contacts)
    }

    async fn find(&self, id: i64) -> Result<Option<Contact>, AppError> {
        Ok(self.contacts.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: i64,
        status: ContactStatus,
        is_read: Option<bool>,
    ) -> Result<Option<Contact>, AppError> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status;
            if let Some(is_read) = is_read {
                c.is_read = is_read;
            }
            c.clone()
        }))
    }

    async fn set_read(&self, id: i64, is_read: bool) -> Result<Option<Contact>, AppError> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.iter_mut().find(|c| c.id == id).map(|c| {
            c.is_read = is_read;
            c.clone()
        }))
    }
}

#[derive(Debug)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        // Uniqueness is checked under the write lock, like a unique index.
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::UsernameTaken(user.username));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: user.username,
            password: user.password_hash,
            name: user.name,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.users.read().await.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            if let Some(name) = name {
                u.name = name;
            }
            if let Some(hash) = password_hash {
                u.password = hash;
            }
            u.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.read().await.len() as i64)
    }
}
