//! Path parameter parsing shared by handlers.
//!
//! Handlers take raw `Path<String>` segments and parse them here so that a
//! non-integer id produces the standard JSON error envelope rather than
//! Axum's plain-text rejection.

use gamecat_core::error::CoreError;
use gamecat_core::types::DbId;

use crate::error::AppResult;

/// Parse an integer id from a path segment named `name`.
pub fn parse_id(raw: &str, name: &str) -> AppResult<DbId> {
    raw.trim().parse::<DbId>().map_err(|_| {
        tracing::debug!(param = name, value = raw, "Rejected non-integer path parameter");
        CoreError::Validation(format!("invalid {name} parameter: '{raw}'")).into()
    })
}
