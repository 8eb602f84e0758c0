//! HTTP-level tests for the genre and mode endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn genres_are_keyed_by_id(pool: PgPool) {
    let images = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, images.path());

    let response = get(app, "/v1/genres").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["genres"]["1"], "Strategy");
    assert_eq!(json["genres"]["3"], "Puzzle");
    assert_eq!(json["genres"].as_object().unwrap().len(), 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn modes_are_keyed_by_id(pool: PgPool) {
    let images = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, images.path());

    let response = get(app, "/v1/modes").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "modes": { "1": "Singleplayer", "2": "Multiplayer", "3": "Co-op" }
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_genre_table_gives_empty_object(pool: PgPool) {
    sqlx::query("DELETE FROM genres").execute(&pool).await.unwrap();
    let images = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, images.path());

    let json = body_json(get(app, "/v1/genres").await).await;

    assert_eq!(json, serde_json::json!({ "genres": {} }));
}
