// src/services/users.rs

use validator::Validate;

use crate::{
    error::AppError,
    models::user::{CreateUserRequest, NewUser, ROOT_ADMIN_ID, UpdateUserRequest, User},
    repository::UserRepository,
    utils::hash::hash_password,
};

pub async fn list(users: &dyn UserRepository) -> Result<Vec<User>, AppError> {
    users.list().await
}

/// Creates another admin account on behalf of a signed-in admin.
pub async fn create(users: &dyn UserRepository, mut req: CreateUserRequest) -> Result<User, AppError> {
    req.username = req.username.trim().to_string();
    req.name = req.name.trim().to_string();
    req.validate()?;
    ensure_passwords_match(&req.password, Some(&req.confirm_password))?;

    if users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::UsernameTaken(req.username));
    }

    let password_hash = hash_password(&req.password)?;
    let user = users
        .create(NewUser {
            username: req.username,
            password_hash,
            name: req.name,
            is_admin: true,
        })
        .await?;

    tracing::info!(user_id = user.id, "Admin user '{}' created", user.username);
    Ok(user)
}

/// Updates name and/or password. The username never changes.
pub async fn update(
    users: &dyn UserRepository,
    id: i64,
    mut req: UpdateUserRequest,
) -> Result<User, AppError> {
    req.name = req.name.map(|n| n.trim().to_string());
    req.validate()?;

    let password_hash = match &req.password {
        Some(password) => {
            ensure_passwords_match(password, req.confirm_password.as_deref())?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    users
        .update(id, req.name, password_hash)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Deletes a user, refusing self-deletion and the root administrator.
pub async fn delete(users: &dyn UserRepository, caller_id: i64, id: i64) -> Result<(), AppError> {
    // Root is checked first so that deleting id 1 is RootProtected for every caller.
    if id == ROOT_ADMIN_ID {
        return Err(AppError::RootProtected);
    }
    if id == caller_id {
        return Err(AppError::SelfDeletionForbidden);
    }

    if !users.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = id, deleted_by = caller_id, "Admin user deleted");
    Ok(())
}

fn ensure_passwords_match(password: &str, confirm: Option<&str>) -> Result<(), AppError> {
    if confirm != Some(password) {
        return Err(AppError::invalid("confirmPassword", "Passwords do not match."));
    }
    Ok(())
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}
