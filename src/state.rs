use std::sync::Arc;

use axum::extract::FromRef;
use tower_sessions::cookie::Key;

use crate::{
    config::{Config, ConfigError},
    repository::{ContactRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactRepository>,
    pub users: Arc<dyn UserRepository>,
    pub config: Config,
    pub session_key: Key,
}

impl AppState {
    pub fn new(
        config: Config,
        contacts: Arc<dyn ContactRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Result<Self, ConfigError> {
        let session_key = config.session_key()?;
        Ok(Self {
            contacts,
            users,
            config,
            session_key,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
