//! Game rows, the assembled `Game` aggregate, and the write command.

use std::collections::BTreeMap;

use gamecat_core::catalog::{image_key_for_title, validate_title};
use gamecat_core::error::CoreError;
use gamecat_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub release_date: Date,
    pub storage: i32,
    pub likes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One `(game, genre|mode)` association joined with the referenced name.
#[derive(Debug, Clone, FromRow)]
pub struct AssociationName {
    pub game_id: DbId,
    pub id: DbId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// A game with its genre and mode names resolved.
///
/// `genres` and `modes` are always present; a game without associations
/// carries empty maps. The image reference is omitted from the JSON form
/// once [`Game::without_image`] has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: DbId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub genres: BTreeMap<DbId, String>,
    pub modes: BTreeMap<DbId, String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub release_date: Date,
    pub storage: i32,
    pub likes: i32,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

impl Game {
    pub fn from_row(
        row: GameRow,
        genres: BTreeMap<DbId, String>,
        modes: BTreeMap<DbId, String>,
    ) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image_url: Some(row.image_url),
            genres,
            modes,
            developers: row.developers,
            publishers: row.publishers,
            release_date: row.release_date,
            storage: row.storage,
            likes: row.likes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Drop the image reference. List and detail responses never carry it;
    /// images are served by their own endpoints.
    pub fn without_image(mut self) -> Self {
        self.image_url = None;
        self
    }
}

// ---------------------------------------------------------------------------
// Write command
// ---------------------------------------------------------------------------

/// Everything needed to create or fully replace a game.
///
/// There is no image or likes field: the image key is derived from the
/// title and likes are reset to zero on every write.
#[derive(Debug, Clone)]
pub struct GameWrite {
    pub title: String,
    pub genre_ids: Vec<DbId>,
    pub mode_ids: Vec<DbId>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub release_date: Date,
    pub storage: i32,
}

impl GameWrite {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        if self.storage < 0 {
            return Err(CoreError::Validation(
                "Storage must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Image store key this game's cover is written under.
    pub fn image_key(&self) -> String {
        image_key_for_title(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess() -> GameWrite {
        GameWrite {
            title: "Chess".to_string(),
            genre_ids: vec![1],
            mode_ids: vec![2],
            developers: vec!["Unknown".to_string()],
            publishers: vec![],
            release_date: Date::from_ymd_opt(1475, 1, 1).unwrap(),
            storage: 50,
        }
    }

    fn sample_game() -> Game {
        let now = chrono::Utc::now();
        Game::from_row(
            GameRow {
                id: 7,
                title: "Chess".to_string(),
                image_url: "Chess.png".to_string(),
                developers: vec!["Unknown".to_string()],
                publishers: vec![],
                release_date: Date::from_ymd_opt(1475, 1, 1).unwrap(),
                storage: 50,
                likes: 0,
                created_at: now,
                updated_at: now,
            },
            BTreeMap::from([(1, "Strategy".to_string())]),
            BTreeMap::new(),
        )
    }

    #[test]
    fn image_key_derives_from_title() {
        assert_eq!(chess().image_key(), "Chess.png");
    }

    #[test]
    fn validate_rejects_negative_storage() {
        let mut input = chess();
        input.storage = -1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_title() {
        let mut input = chess();
        input.title = "../Chess".to_string();
        assert!(input.validate().is_err());
        assert!(chess().validate().is_ok());
    }

    #[test]
    fn serialized_game_hides_timestamps_and_keeps_empty_maps() {
        let json = serde_json::to_value(sample_game()).unwrap();

        assert_eq!(json["image_url"], "Chess.png");
        assert_eq!(json["genres"]["1"], "Strategy");
        assert!(json["modes"].as_object().unwrap().is_empty());
        assert_eq!(json["release_date"], "1475-01-01");
        assert!(json.get("created_at").is_none());
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn without_image_omits_image_url() {
        let json = serde_json::to_value(sample_game().without_image()).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["title"], "Chess");
    }
}
