use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gamecat_core::error::CoreError;
use gamecat_core::image_store::ImageStoreError;
use gamecat_db::error::RepoError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain, repository and image-store errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce the
/// `{ "error": true, "message": ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gamecat_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `gamecat_db`.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// An image storage error.
    #[error(transparent)]
    Image(#[from] ImageStoreError),

    /// A multipart body that could not be read. Keeps the status Axum
    /// chose (400 for a malformed body, 413 past the body limit).
    #[error("Invalid upload: {message}")]
    Upload { status: StatusCode, message: String },
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Upload {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Repo(repo) => classify_repo_error(repo),
            AppError::Image(image) => classify_image_error(image),
            AppError::Upload { status, message } => (*status, message.clone()),
        };

        let body = json!({
            "error": true,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
    }
}

/// Classify a repository error into an HTTP status and message.
///
/// - `NotFound` maps to 404.
/// - Rule violations and writes referencing unknown genres/modes map to 400.
/// - Store failures map to 500 with a sanitized message; the cause is logged.
fn classify_repo_error(err: &RepoError) -> (StatusCode, String) {
    match err {
        RepoError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            format!("{entity} with id {id} not found"),
        ),
        RepoError::Invalid(core) => classify_core_error(core),
        RepoError::Write(_) if err.is_foreign_key_violation() => (
            StatusCode::BAD_REQUEST,
            "Unknown genre or mode id".to_string(),
        ),
        RepoError::Query(cause) => {
            tracing::error!(error = %cause, "Catalogue query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read from the catalogue".to_string(),
            )
        }
        RepoError::Write(cause) => {
            tracing::error!(error = %cause, "Catalogue write failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to write to the catalogue".to_string(),
            )
        }
    }
}

fn classify_image_error(err: &ImageStoreError) -> (StatusCode, String) {
    match err {
        ImageStoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ImageStoreError::InvalidKey(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ImageStoreError::Io { .. } => {
            tracing::error!(error = %err, "Image store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to access image storage".to_string(),
            )
        }
    }
}
