use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Process configuration, loaded once at startup and passed to the router
/// state explicitly. No global registry: everything that needs a setting
/// receives it through its constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// On-disk directory that stored images are written to
    pub dir: PathBuf,
    /// URL prefix the directory is served under
    pub public_prefix: String,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET_KEY` are required; everything else has
    /// a development-friendly default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret =
            env::var("JWT_SECRET_KEY").map_err(|_| ConfigError::Missing("JWT_SECRET_KEY"))?;

        Ok(Self {
            server: ServerConfig { port: env_parse("PORT", 3000) },
            database: DatabaseConfig {
                url,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
                acquire_timeout_secs: env_parse("DATABASE_ACQUIRE_TIMEOUT_SECS", 3),
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", 24),
            },
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or_else(|_| "uploads".into()),
                public_prefix: "/uploads".to_string(),
                max_request_size_bytes: env_parse("MAX_REQUEST_SIZE_BYTES", 10 * 1024 * 1024),
            },
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
