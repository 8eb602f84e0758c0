//! Route definitions for games and their cover images.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{games, images};
use crate::state::AppState;

/// Game routes mounted under `/v1`.
///
/// ```text
/// GET    /games                -> list_games
/// GET    /games/genre/{genre}  -> list_games_by_genre
/// GET    /games/images         -> list_game_images
/// PUT    /games/insert         -> insert_game
/// PUT    /games/update/{id}    -> update_game
/// DELETE /games/delete/{id}    -> delete_game
/// GET    /game/{id}            -> get_game
/// GET    /game/{id}/image      -> get_game_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/games", get(games::list_games))
        .route("/games/genre/{genre}", get(games::list_games_by_genre))
        .route("/games/images", get(images::list_game_images))
        .route("/games/insert", put(games::insert_game))
        .route("/games/update/{id}", put(games::update_game))
        .route("/games/delete/{id}", delete(games::delete_game))
        .route("/game/{id}", get(games::get_game))
        .route("/game/{id}/image", get(images::get_game_image))
}
