use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Reference table routes mounted under `/v1`.
///
/// ```text
/// GET /genres  -> list_genres
/// GET /modes   -> list_modes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(lookups::list_genres))
        .route("/modes", get(lookups::list_modes))
}
