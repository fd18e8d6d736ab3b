// src/services/auth.rs

use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, NewUser, RegisterRequest, User},
    repository::UserRepository,
    utils::hash::{hash_password, verify_dummy, verify_password},
};

/// Checks a username/password pair.
///
/// Unknown usernames and wrong passwords produce the same error, and both
/// cost one Argon2 verification.
pub async fn authenticate(users: &dyn UserRepository, req: &LoginRequest) -> Result<User, AppError> {
    req.validate()?;

    let Some(user) = users.find_by_username(&req.username).await? else {
        verify_dummy(&req.password);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&req.password, &user.password)? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

/// Creates a new admin account from the self-service form.
pub async fn register(users: &dyn UserRepository, mut req: RegisterRequest) -> Result<User, AppError> {
    req.username = req.username.trim().to_string();
    req.name = req.name.trim().to_string();
    req.validate()?;

    if users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::UsernameTaken(req.username));
    }

    let password_hash = hash_password(&req.password)?;
    users
        .create(NewUser {
            username: req.username,
            password_hash,
            name: req.name,
            is_admin: true,
        })
        .await
}

/// Whether `/api/register` may be used without an admin session.
///
/// Always allowed while the users table is empty so the first account can be
/// bootstrapped; afterwards only when open registration is configured.
pub async fn registration_open(users: &dyn UserRepository, config: &Config) -> Result<bool, AppError> {
    if config.allow_open_registration {
        return Ok(true);
    }
    Ok(users.count().await? == 0)
}

/// Creates the root administrator when no user exists yet.
///
/// Returns the created user, or `None` if users already exist or no
/// `ADMIN_PASSWORD` was configured.
pub async fn seed_root_admin(users: &dyn UserRepository, config: &Config) -> Result<Option<User>, AppError> {
    if users.count().await? > 0 {
        return Ok(None);
    }

    let Some(password) = &config.admin_password else {
        tracing::warn!("No users exist and ADMIN_PASSWORD is not set; root admin not seeded");
        return Ok(None);
    };

    tracing::info!("Seeding root admin user: {}", config.admin_username);
    let password_hash = hash_password(password)?;
    let user = users
        .create(NewUser {
            username: config.admin_username.clone(),
            password_hash,
            name: config.admin_name.clone(),
            is_admin: true,
        })
        .await?;
    tracing::info!("Root admin created with id {}", user.id);

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryUserRepository;

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            session_secret: "s".repeat(64),
            session_ttl_hours: 24,
            cookie_secure: false,
            allow_open_registration: false,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            cors_origins: Vec::new(),
            static_dir: None,
            rust_log: "error".to_string(),
            admin_username: "admin".to_string(),
            admin_password: Some("admin123".to_string()),
            admin_name: "Administrador".to_string(),
        }
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn seeding_creates_root_admin_once() {
        let users = MemoryUserRepository::new();
        let config = test_config();

        let root = seed_root_admin(&users, &config).await.unwrap().unwrap();
        assert_eq!(root.id, 1);
        assert!(root.is_admin);
        assert_ne!(root.password, "admin123");

        assert!(seed_root_admin(&users, &config).await.unwrap().is_none());
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seeding_without_password_is_skipped() {
        let users = MemoryUserRepository::new();
        let config = Config {
            admin_password: None,
            ..test_config()
        };
        assert!(seed_root_admin(&users, &config).await.unwrap().is_none());
        assert_eq!(users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let users = MemoryUserRepository::new();
        seed_root_admin(&users, &test_config()).await.unwrap();

        let wrong_password = authenticate(&users, &login("admin", "wrongpassword")).await;
        let unknown_user = authenticate(&users, &login("nonexistent", "anything")).await;
        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));

        let ok = authenticate(&users, &login("admin", "admin123")).await.unwrap();
        assert_eq!(ok.username, "admin");
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let users = MemoryUserRepository::new();
        seed_root_admin(&users, &test_config()).await.unwrap();

        let req = RegisterRequest {
            username: "admin".into(),
            password: "secret1".into(),
            name: "Outro".into(),
        };
        assert!(matches!(
            register(&users, req).await,
            Err(AppError::UsernameTaken(_))
        ));
    }

    #[tokio::test]
    async fn registration_is_open_only_for_bootstrap_by_default() {
        let users = MemoryUserRepository::new();
        let config = test_config();
        assert!(registration_open(&users, &config).await.unwrap());

        seed_root_admin(&users, &config).await.unwrap();
        assert!(!registration_open(&users, &config).await.unwrap());

        let open = Config {
            allow_open_registration: true,
            ..test_config()
        };
        assert!(registration_open(&users, &open).await.unwrap());
    }
}
