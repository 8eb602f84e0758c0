//! PostgreSQL access for the games catalogue.
//!
//! Pool construction, migrations, row models, and the repositories that
//! assemble `Game` aggregates from the `games`, `genres`, `modes`,
//! `games_genres` and `games_modes` tables.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Applied both as the pool acquire timeout and as the server-side
    /// `statement_timeout` of every connection.
    pub timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            timeout: Duration::from_secs(3),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    let statement_timeout = format!("{}ms", settings.timeout.as_millis());
    let options = PgConnectOptions::from_str(database_url)?
        .options([("statement_timeout", statement_timeout.as_str())]);

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.timeout)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
