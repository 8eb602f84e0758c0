//! Shared response envelope types for API handlers.
//!
//! Every JSON response is a single-key object naming the resource:
//! `{ "games": [...] }`, `{ "game": {...} }`, `{ "genres": {...} }`,
//! `{ "OK": { "ok": true } }`. Use [`Envelope`] instead of ad-hoc
//! `serde_json::json!` so payloads stay typed.

use axum::Json;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// `{ <key>: T }` response envelope.
#[derive(Debug)]
pub struct Envelope<T> {
    pub key: &'static str,
    pub payload: T,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.payload)?;
        map.end()
    }
}

/// Wrap `payload` under `key` as a JSON response body.
///
/// # Example
///
/// ```ignore
/// Ok(enveloped("games", games))
/// ```
pub fn enveloped<T: Serialize>(key: &'static str, payload: T) -> Json<Envelope<T>> {
    Json(Envelope { key, payload })
}

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Serialize)]
pub struct WriteAck {
    pub ok: bool,
}

/// `{ "OK": { "ok": true } }`.
pub fn write_ok() -> Json<Envelope<WriteAck>> {
    enveloped("OK", WriteAck { ok: true })
}
