pub mod games;
pub mod lookups;
pub mod status;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                      list all games
/// /games/genre/{genre}        games in one genre
/// /games/images               every cover, base64 encoded
/// /games/insert               create (multipart)
/// /games/update/{id}          full replace (multipart)
/// /games/delete/{id}          delete
/// /game/{id}                  one game
/// /game/{id}/image            raw cover bytes
///
/// /genres                     genre id -> name
/// /modes                      mode id -> name
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(games::router())
        .merge(lookups::router())
}
