use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Status response payload.
#[derive(Serialize)]
pub struct StatusResponse {
    /// `Available` when the database answers, `Degraded` otherwise.
    pub status: &'static str,
    /// Deployment environment from `APP_ENV`.
    pub environment: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /status -- service identity and database reachability.
///
/// Always answers 200; an unreachable database only flips `status`.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let db_healthy = gamecat_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Database health probe failed");
    }

    Json(StatusResponse {
        status: if db_healthy { "Available" } else { "Degraded" },
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount the status route (root level, NOT under `/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status))
}
