//! Repository for the `genres` and `modes` reference tables.

use std::collections::BTreeMap;

use gamecat_core::types::DbId;
use sqlx::PgPool;

use crate::error::{RepoError, RepoResult};
use crate::models::lookup::LookupEntry;

/// Read-only access to the reference tables.
pub struct LookupRepo;

impl LookupRepo {
    /// Every genre as `id -> genre_name`. An empty table yields an empty map.
    pub async fn list_genres(pool: &PgPool) -> RepoResult<BTreeMap<DbId, String>> {
        Self::list(pool, "SELECT id, genre_name AS name FROM genres").await
    }

    /// Every mode as `id -> mode_name`. An empty table yields an empty map.
    pub async fn list_modes(pool: &PgPool) -> RepoResult<BTreeMap<DbId, String>> {
        Self::list(pool, "SELECT id, mode_name AS name FROM modes").await
    }

    async fn list(pool: &PgPool, query: &str) -> RepoResult<BTreeMap<DbId, String>> {
        let entries = sqlx::query_as::<_, LookupEntry>(query)
            .fetch_all(pool)
            .await
            .map_err(RepoError::Query)?;

        Ok(entries.into_iter().map(|e| (e.id, e.name)).collect())
    }
}
