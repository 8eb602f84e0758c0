//! Cover image storage.
//!
//! Images are addressed by key (the game's derived image name). The HTTP
//! layer writes the uploaded bytes here before the game row is persisted,
//! and reads them back for the image endpoints.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Errors produced by an [`ImageStore`].
#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Invalid image key: {0}")]
    InvalidKey(String),

    #[error("Image store I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Key/value blob storage for cover images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any previous content.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), ImageStoreError>;

    /// Fetch the bytes stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, ImageStoreError>;
}

/// Filesystem-backed [`ImageStore`]: one file per key directly under `root`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `key` to a path under `root`, refusing anything that could
    /// escape the directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, ImageStoreError> {
        let invalid = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0']);
        if invalid {
            return Err(ImageStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), ImageStoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| ImageStoreError::Io {
            key: key.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;
        tokio::fs::write(&path, bytes).await.map_err(io_err)?;

        tracing::debug!(key, size = bytes.len(), "Stored image");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, ImageStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ImageStoreError::NotFound(key.to_string()))
            }
            Err(source) => Err(ImageStoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path());

        store.put("Chess.png", b"\x89PNG fake").await.unwrap();
        let bytes = store.get("Chess.png").await.unwrap();

        assert_eq!(bytes, b"\x89PNG fake");
    }

    #[tokio::test]
    async fn put_overwrites_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path());

        store.put("Go.png", b"a much longer first image").await.unwrap();
        store.put("Go.png", b"short").await.unwrap();

        assert_eq!(store.get("Go.png").await.unwrap(), b"short");
    }

    #[tokio::test]
    async fn put_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path().join("nested").join("images"));

        store.put("Tetris.png", b"x").await.unwrap();

        assert!(store.root().join("Tetris.png").exists());
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path());

        assert_matches!(
            store.get("Nope.png").await,
            Err(ImageStoreError::NotFound(key)) if key == "Nope.png"
        );
    }

    #[tokio::test]
    async fn keys_escaping_root_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path());

        assert_matches!(
            store.put("../evil.png", b"x").await,
            Err(ImageStoreError::InvalidKey(_))
        );
        assert_matches!(store.get("..").await, Err(ImageStoreError::InvalidKey(_)));
        assert_matches!(store.get("").await, Err(ImageStoreError::InvalidKey(_)));
    }
}
