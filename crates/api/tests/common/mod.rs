#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use gamecat_api::config::ServerConfig;
use gamecat_api::router::build_app_router;
use gamecat_api::state::AppState;
use gamecat_core::image_store::FsImageStore;

const BOUNDARY: &str = "gamecat-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Images go to `image_dir`, CORS allows any origin and uploads are capped
/// at 1 MiB.
pub fn test_config(image_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        image_dir: PathBuf::from(image_dir),
        db_max_connections: 5,
        db_timeout_secs: 3,
    }
}

/// Build the full application router, middleware included, over `pool` and a
/// filesystem image store rooted at `image_dir`.
pub fn build_test_app(pool: PgPool, image_dir: &Path) -> Router {
    let config = test_config(image_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(FsImageStore::new(image_dir)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// PUT a multipart submission. `game` is sent as the JSON text of the `game`
/// field; `image`, when present, as the `image` file field.
pub async fn put_multipart(
    app: Router,
    uri: &str,
    game: &serde_json::Value,
    image: Option<&[u8]>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(game, image)))
        .unwrap();
    send(app, request).await
}

/// PUT a JSON body, for endpoints that expect something else.
pub async fn put_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn multipart_body(game: &serde_json::Value, image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"game\"\r\n\r\n{game}\r\n"
        )
        .as_bytes(),
    );

    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"cover.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A valid `game` field value.
pub fn game_json(title: &str, genres: &[i64], modes: &[i64]) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "genres": genres,
        "modes": modes,
        "developers": ["Studio A"],
        "publishers": ["Publisher"],
        "release_date": "2001-09-30",
        "storage": 50
    })
}

/// Bytes that look enough like a PNG for storage round trips.
pub const COVER: &[u8] = b"\x89PNG\r\n\x1a\ncover-bytes";
