//! Handlers serving cover images.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gamecat_core::catalog::IMAGE_CONTENT_TYPE;
use gamecat_core::types::DbId;
use gamecat_db::repositories::GameRepo;

use crate::error::AppResult;
use crate::params::parse_id;
use crate::response::{enveloped, Envelope};
use crate::state::AppState;

/// GET /v1/game/{id}/image
///
/// Raw cover bytes served as `image/png`.
pub async fn get_game_image(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&raw_id, "id")?;
    let key = GameRepo::find_image_key(&state.pool, id).await?;
    let bytes = state.images.get(&key).await?;

    Ok(([(header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)], bytes))
}

/// GET /v1/games/images
///
/// Every cover as `id -> base64 bytes`. A single unreadable image fails the
/// whole request.
pub async fn list_game_images(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<BTreeMap<DbId, String>>>> {
    let keys = GameRepo::list_image_keys(&state.pool).await?;

    let mut images = BTreeMap::new();
    for (id, key) in keys {
        let bytes = state.images.get(&key).await?;
        images.insert(id, STANDARD.encode(bytes));
    }

    Ok(enveloped("images", images))
}
