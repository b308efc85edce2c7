use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub started_at: DateTime<Local>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid Credentials")]
    InvalidCredentials,
}

/// Login check the console screens depend on.
pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// A single administrator account taken from configuration.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if credentials.username != self.username || credentials.password != self.password {
            warn!(username = %credentials.username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!(username = %credentials.username, "login accepted");
        Ok(Session {
            username: credentials.username.clone(),
            started_at: Local::now(),
        })
    }
}
