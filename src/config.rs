// src/config.rs

use std::{env, fmt, net::SocketAddr};

use dotenvy::dotenv;
use tower_sessions::cookie::Key;

/// Minimum length accepted for `SESSION_SECRET`; cookie signing keys are 64 bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid(var, reason) => write!(f, "{} is invalid: {}", var, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub allow_open_registration: bool,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub static_dir: Option<String>,
    pub rust_log: String,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub admin_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET",
                format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            ));
        }

        let session_ttl_hours = match env::var("SESSION_TTL_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|h| *h > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid("SESSION_TTL_HOURS", "expected a positive integer".into())
                })?,
            Err(_) => 24,
        };

        // Secure cookies by default whenever the public URL is served over TLS.
        let public_url = env::var("PUBLIC_URL").unwrap_or_default();
        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(raw) => parse_bool("COOKIE_SECURE", &raw)?,
            Err(_) => public_url.starts_with("https://"),
        };

        let allow_open_registration = match env::var("ALLOW_OPEN_REGISTRATION") {
            Ok(raw) => parse_bool("ALLOW_OPEN_REGISTRATION", &raw)?,
            Err(_) => false,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid("BIND_ADDR", e.to_string()))?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let static_dir = env::var("STATIC_DIR").ok().filter(|s| !s.is_empty());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());
        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".to_string());

        Ok(Self {
            database_url,
            session_secret,
            session_ttl_hours,
            cookie_secure,
            allow_open_registration,
            bind_addr,
            cors_origins,
            static_dir,
            rust_log,
            admin_username,
            admin_password,
            admin_name,
        })
    }

    /// Key used to sign the session cookie.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        Key::try_from(self.session_secret.as_bytes())
            .map_err(|e| ConfigError::Invalid("SESSION_SECRET", format!("{:?}", e)))
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(var, format!("'{}' is not a boolean", other))),
    }
}
