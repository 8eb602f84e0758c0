//! Catalogue rules: image key derivation, title checks, id de-duplication,
//! and release-date parsing.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Extension appended to a game title to form its image key.
pub const IMAGE_EXTENSION: &str = ".png";

/// Content type served for stored cover images.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Maximum accepted title length, in characters.
pub const MAX_TITLE_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Image keys
// ---------------------------------------------------------------------------

/// Derive the image store key for a game title (`"Chess"` -> `"Chess.png"`).
///
/// The key is always recomputed from the title on write; it is never taken
/// from client input.
pub fn image_key_for_title(title: &str) -> String {
    format!("{title}{IMAGE_EXTENSION}")
}

// ---------------------------------------------------------------------------
// Title validation
// ---------------------------------------------------------------------------

/// Validate a game title.
///
/// The title doubles as a file name in the image store, so besides being
/// non-blank and bounded it must not contain path separators, NUL bytes, or
/// be a relative path component.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if title.contains(['/', '\\', '\0']) {
        return Err(CoreError::Validation(
            "Title must not contain path separators".into(),
        ));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(CoreError::Validation(format!(
            "Title '{trimmed}' is not allowed"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Association ids
// ---------------------------------------------------------------------------

/// Remove duplicate ids, keeping the first occurrence of each.
pub fn distinct_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

// ---------------------------------------------------------------------------
// Release dates
// ---------------------------------------------------------------------------

/// Parse a release date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp. The time-of-day of a timestamp is discarded after converting
/// to UTC.
pub fn parse_release_date(raw: &str) -> Result<Date, CoreError> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc).date_naive())
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid release_date '{raw}': expected YYYY-MM-DD or an RFC 3339 timestamp"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
