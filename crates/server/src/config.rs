//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local demo out of the box.
//!
//! - `MINIMART_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite:minimart.db`, the file is created if missing)
//! - `MINIMART_HOST` - Bind address (default: 127.0.0.1)
//! - `MINIMART_PORT` - Listen port (default: 3000)
//! - `MINIMART_SESSION_SECRET` - Session cookie signing secret, min 32 chars.
//!   When unset a built-in dev secret is used and a warning is logged at
//!   startup; never deploy with the dev secret.
//! - `MINIMART_ADMIN_PASSWORD` - HTTP Basic password for `/admin`. When
//!   unset (or empty) the admin pages are open and a warning is logged.

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Signing secret used when `MINIMART_SESSION_SECRET` is unset.
///
/// Anyone who knows this string can forge session cookies, which is why
/// startup logs a warning whenever it is in use.
const DEV_SESSION_SECRET: &str = "minimart-dev-session-secret-do-not-deploy-with-this";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Minimart application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` connection string
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// True when `session_secret` is the built-in dev secret
    pub session_secret_is_default: bool,
    /// HTTP Basic password guarding `/admin`; `None` leaves admin open
    pub admin_password: Option<SecretString>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or a configured
    /// session secret is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_env_or_default(
            "MINIMART_DATABASE_URL",
            "sqlite:minimart.db",
        ));
        let host = get_env_or_default("MINIMART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MINIMART_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MINIMART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MINIMART_PORT".to_string(), e.to_string()))?;

        let (session_secret, session_secret_is_default) =
            match get_optional_env("MINIMART_SESSION_SECRET") {
                Some(value) => {
                    let secret = SecretString::from(value);
                    validate_session_secret(&secret, "MINIMART_SESSION_SECRET")?;
                    (secret, false)
                }
                None => (SecretString::from(DEV_SESSION_SECRET), true),
            };

        let admin_password = get_optional_env("MINIMART_ADMIN_PASSWORD")
            .filter(|value| !value.is_empty())
            .map(SecretString::from);

        Ok(Self {
            database_url,
            host,
            port,
            session_secret,
            session_secret_is_default,
            admin_password,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
///
/// The signing key is derived from this value, and key derivation rejects
/// anything shorter than 32 bytes.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}
