//! Handlers for the games resource.
//!
//! Read endpoints return aggregates with the image reference stripped;
//! covers are served by [`super::images`]. Write endpoints take the
//! multipart shape decoded by [`crate::multipart`] and store the image
//! before touching the database.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use gamecat_db::error::RepoError;
use gamecat_db::models::game::Game;
use gamecat_db::repositories::GameRepo;

use crate::error::AppResult;
use crate::multipart::{read_submission, GameSubmission};
use crate::params::parse_id;
use crate::response::{enveloped, write_ok, Envelope, WriteAck};
use crate::state::AppState;

/// GET /v1/games
///
/// Every game ordered by title.
pub async fn list_games(State(state): State<AppState>) -> AppResult<Json<Envelope<Vec<Game>>>> {
    let games = GameRepo::list_all(&state.pool).await?;
    Ok(enveloped("games", strip_images(games)))
}

/// GET /v1/game/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Envelope<Game>>> {
    let id = parse_id(&raw_id, "id")?;
    let game = GameRepo::find_by_id(&state.pool, id).await?;
    Ok(enveloped("game", game.without_image()))
}

/// GET /v1/games/genre/{genre}
///
/// Games associated with the given genre id, ordered by title.
pub async fn list_games_by_genre(
    State(state): State<AppState>,
    Path(raw_genre): Path<String>,
) -> AppResult<Json<Envelope<Vec<Game>>>> {
    let genre_id = parse_id(&raw_genre, "genre")?;
    let games = GameRepo::list_by_genre(&state.pool, genre_id).await?;
    Ok(enveloped("games", strip_images(games)))
}

/// PUT /v1/games/insert
///
/// Multipart `game` + `image`. The cover is written under the key derived
/// from the title, then the game and its associations are inserted.
pub async fn insert_game(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Envelope<WriteAck>>> {
    let GameSubmission { game, image } = read_submission(multipart?).await?;

    state.images.put(&game.image_key(), &image).await?;
    let id = GameRepo::insert(&state.pool, &game).await?;

    tracing::info!(game_id = id, image_bytes = image.len(), "Game created");
    Ok(write_ok())
}

/// PUT /v1/games/update/{id}
///
/// Same multipart shape as insert. Replaces every field and both
/// association sets of the game. A missing id is rejected before the cover
/// is written.
pub async fn update_game(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Envelope<WriteAck>>> {
    let id = parse_id(&raw_id, "id")?;
    let GameSubmission { game, image } = read_submission(multipart?).await?;

    if !GameRepo::exists(&state.pool, id).await? {
        return Err(RepoError::NotFound { entity: "Game", id }.into());
    }

    state.images.put(&game.image_key(), &image).await?;
    GameRepo::update(&state.pool, id, &game).await?;

    tracing::info!(game_id = id, image_bytes = image.len(), "Game replaced");
    Ok(write_ok())
}

/// DELETE /v1/games/delete/{id}
///
/// Deleting an id that does not exist still answers `ok`.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Envelope<WriteAck>>> {
    let id = parse_id(&raw_id, "id")?;
    let deleted = GameRepo::delete(&state.pool, id).await?;

    tracing::info!(game_id = id, deleted, "Game delete requested");
    Ok(write_ok())
}

fn strip_images(games: Vec<Game>) -> Vec<Game> {
    games.into_iter().map(Game::without_image).collect()
}
