//! Handlers for the genre and mode reference tables.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use gamecat_core::types::DbId;
use gamecat_db::repositories::LookupRepo;

use crate::error::AppResult;
use crate::response::{enveloped, Envelope};
use crate::state::AppState;

/// GET /v1/genres
///
/// Every genre as an `id -> name` object.
pub async fn list_genres(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<BTreeMap<DbId, String>>>> {
    let genres = LookupRepo::list_genres(&state.pool).await?;
    Ok(enveloped("genres", genres))
}

/// GET /v1/modes
///
/// Every mode as an `id -> name` object.
pub async fn list_modes(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<BTreeMap<DbId, String>>>> {
    let modes = LookupRepo::list_modes(&state.pool).await?;
    Ok(enveloped("modes", modes))
}
