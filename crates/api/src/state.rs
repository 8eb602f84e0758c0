use std::sync::Arc;

use gamecat_core::image_store::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamecat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cover image storage.
    pub images: Arc<dyn ImageStore>,
}
