use std::path::PathBuf;
use std::time::Duration;

use gamecat_db::PoolSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Deployment environment reported by `/status` (default: `development`).
    pub environment: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body, multipart uploads included (default: 32 MiB).
    pub max_upload_bytes: usize,
    /// Directory holding cover images (default: `./images`).
    pub image_dir: PathBuf,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Per-statement and pool-acquire timeout in seconds (default: `3`).
    pub db_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `APP_ENV`              | `development`              |
    /// | `CORS_ORIGINS`         | `*`                        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `33554432`                 |
    /// | `IMAGE_DIR`            | `./images`                 |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `DB_TIMEOUT_SECS`      | `3`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (32 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let image_dir = PathBuf::from(
            std::env::var("IMAGE_DIR").unwrap_or_else(|_| "./images".into()),
        );

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let db_timeout_secs: u64 = std::env::var("DB_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("DB_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            image_dir,
            db_max_connections,
            db_timeout_secs,
        }
    }

    /// Pool tuning derived from the `DB_*` settings.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            timeout: Duration::from_secs(self.db_timeout_secs),
        }
    }
}
