//! Reference-table rows (`genres`, `modes`).

use gamecat_core::types::DbId;
use sqlx::FromRow;

/// An `(id, name)` pair from a reference table. Queries alias the table's
/// name column (`genre_name`, `mode_name`) to `name`.
#[derive(Debug, Clone, FromRow)]
pub struct LookupEntry {
    pub id: DbId,
    pub name: String,
}
