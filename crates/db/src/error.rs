use gamecat_core::error::CoreError;
use gamecat_core::types::DbId;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors returned by the repositories.
///
/// Read paths report store failures as [`RepoError::Query`], write paths as
/// [`RepoError::Write`]. Statement and pool-acquire timeouts land in the same
/// two variants.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Write failed: {0}")]
    Write(#[source] sqlx::Error),
}

/// Convenience alias for repository results.
pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Whether this is a write rejected because it referenced a missing
    /// game, genre or mode.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            RepoError::Write(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
            }
            _ => false,
        }
    }
}
