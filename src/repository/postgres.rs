// src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder, Postgres};

use super::{ContactRepository, UserRepository};
use crate::{
    error::AppError,
    models::{
        contact::{Contact, ContactRow, ContactStatus, NewContact},
        user::{NewUser, User},
    },
};

const CONTACT_COLUMNS: &str =
    "id, name, email, phone, message, status, is_read, created_at";

const USER_COLUMNS: &str = "id, username, password, name, is_admin, created_at";

#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, contact: NewContact) -> Result<Contact, AppError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            INSERT INTO contacts (name, email, phone, message, status, is_read)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .bind(ContactStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert contact: {:?}", e);
            AppError::from(e)
        })?;

        row.try_into()
    }

    async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, AppError> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn find(&self, id: i64) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Contact::try_from).transpose()
    }

    async fn update_status(
        &self,
        id: i64,
        status: ContactStatus,
        is_read: Option<bool>,
    ) -> Result<Option<Contact>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE contacts SET status = ");
        builder.push_bind(status.as_str());

        if let Some(is_read) = is_read {
            builder.push(", is_read = ");
            builder.push_bind(is_read);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {CONTACT_COLUMNS}"));

        let row = builder
            .build_query_as::<ContactRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update contact status: {:?}", e);
                AppError::from(e)
            })?;

        row.map(Contact::try_from).transpose()
    }

    async fn set_read(&self, id: i64, is_read: bool) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "UPDATE contacts SET is_read = $1 WHERE id = $2 RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(is_read)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Contact::try_from).transpose()
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password, name, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique_violation {
                AppError::UsernameTaken(user.username.clone())
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::from(e)
        })?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, AppError> {
        if name.is_none() && password_hash.is_none() {
            return self.find_by_id(id).await;
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }

        if let Some(hash) = password_hash {
            separated.push("password = ");
            separated.push_bind_unseparated(hash);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {USER_COLUMNS}"));

        let user = builder
            .build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update user: {:?}", e);
                AppError::from(e)
            })?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user: {:?}", e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
