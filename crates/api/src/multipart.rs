//! Decoding of game submissions.
//!
//! Insert and update requests are `multipart/form-data` with two fields:
//!
//! - `game`: JSON text decoding to [`GamePayload`]
//! - `image`: the raw cover image bytes
//!
//! Unknown fields are ignored. A `likes` key inside the JSON is accepted and
//! ignored because likes are reset on every write.

use axum::extract::Multipart;
use gamecat_core::catalog::{parse_release_date, validate_title};
use gamecat_core::error::CoreError;
use gamecat_core::types::DbId;
use gamecat_db::models::game::GameWrite;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;

/// Multipart field carrying the JSON payload.
pub const GAME_FIELD: &str = "game";

/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

/// JSON body of the `game` field.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GamePayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub genres: Vec<DbId>,
    #[serde(default)]
    pub modes: Vec<DbId>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub release_date: String,
    #[validate(range(min = 0))]
    pub storage: i32,
}

impl GamePayload {
    /// Validate and convert into the repository write command.
    pub fn into_write(self) -> Result<GameWrite, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_title(&self.title)?;
        let release_date = parse_release_date(&self.release_date)?;

        Ok(GameWrite {
            title: self.title,
            genre_ids: self.genres,
            mode_ids: self.modes,
            developers: self.developers,
            publishers: self.publishers,
            release_date,
            storage: self.storage,
        })
    }
}

/// A decoded insert/update request.
#[derive(Debug)]
pub struct GameSubmission {
    pub game: GameWrite,
    pub image: Vec<u8>,
}

/// Read the `game` and `image` fields from a multipart body.
pub async fn read_submission(mut multipart: Multipart) -> AppResult<GameSubmission> {
    let mut payload: Option<GamePayload> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            GAME_FIELD => {
                let text = field.text().await?;
                let decoded = serde_json::from_str::<GamePayload>(&text).map_err(|e| {
                    CoreError::Validation(format!("Invalid '{GAME_FIELD}' field: {e}"))
                })?;
                payload = Some(decoded);
            }
            IMAGE_FIELD => {
                image = Some(field.bytes().await?.to_vec());
            }
            _ => {} // ignore unknown fields
        }
    }

    let payload = payload.ok_or_else(|| {
        CoreError::Validation(format!("Missing required '{GAME_FIELD}' field"))
    })?;
    let image = image.ok_or_else(|| {
        CoreError::Validation(format!("Missing required '{IMAGE_FIELD}' field"))
    })?;
    if image.is_empty() {
        return Err(CoreError::Validation("Image file must not be empty".into()).into());
    }

    Ok(GameSubmission {
        game: payload.into_write()?,
        image,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    fn decode(json: serde_json::Value) -> GamePayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn full_payload_converts() {
        let payload = decode(serde_json::json!({
            "title": "Chess",
            "genres": [1],
            "modes": [2],
            "developers": ["Dev"],
            "publishers": ["Pub"],
            "release_date": "2001-09-30T10:00:00Z",
            "storage": 50,
            "likes": 999
        }));

        let write = payload.into_write().unwrap();

        assert_eq!(write.title, "Chess");
        assert_eq!(write.genre_ids, vec![1]);
        assert_eq!(write.mode_ids, vec![2]);
        assert_eq!(write.developers, vec!["Dev"]);
        assert_eq!(write.publishers, vec!["Pub"]);
        assert_eq!(write.release_date, NaiveDate::from_ymd_opt(2001, 9, 30).unwrap());
        assert_eq!(write.storage, 50);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let payload = decode(serde_json::json!({
            "title": "Go",
            "release_date": "1990-01-01",
            "storage": 1
        }));

        let write = payload.into_write().unwrap();

        assert!(write.genre_ids.is_empty());
        assert!(write.mode_ids.is_empty());
        assert!(write.developers.is_empty());
    }

    #[test]
    fn negative_storage_is_rejected() {
        let payload = decode(serde_json::json!({
            "title": "Go",
            "release_date": "1990-01-01",
            "storage": -5
        }));

        assert_matches!(payload.into_write(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_or_path_like_title_is_rejected() {
        for title in ["", "a/b"] {
            let payload = decode(serde_json::json!({
                "title": title,
                "release_date": "1990-01-01",
                "storage": 0
            }));
            assert_matches!(payload.into_write(), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn bad_release_date_is_rejected() {
        let payload = decode(serde_json::json!({
            "title": "Go",
            "release_date": "soon",
            "storage": 0
        }));

        assert_matches!(payload.into_write(), Err(CoreError::Validation(_)));
    }
}
