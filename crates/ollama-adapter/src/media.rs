//! Media collaborator resolving opaque identifiers to base64 payloads

use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use thiserror::Error;

/// Failure to resolve a media identifier
#[derive(Debug, Error)]
#[error("media {media_id} unavailable: {reason}")]
pub struct MediaError {
    /// Identifier that failed to resolve
    pub media_id: String,
    /// What went wrong
    pub reason: String,
}

impl MediaError {
    /// Create an error for the given identifier
    pub fn new(media_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            reason: reason.into(),
        }
    }
}

/// Store that resolves media identifiers to base64-encoded payloads
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Look up a media identifier and return its base64 encoding
    async fn base64(&self, media_id: &str) -> Result<String, MediaError>;
}

/// In-memory media store for embedded use and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaStore {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryMediaStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw bytes under a media identifier
    pub fn insert(&mut self, media_id: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(media_id.into(), bytes);
    }
}

#[async_trait]
impl MediaResolver for InMemoryMediaStore {
    async fn base64(&self, media_id: &str) -> Result<String, MediaError> {
        self.entries
            .get(media_id)
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
            .ok_or_else(|| MediaError::new(media_id, "not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_registered_bytes() {
        let mut store = InMemoryMediaStore::new();
        store.insert("img-1", vec![1, 2, 3]);

        let encoded = store.base64("img-1").await.unwrap();
        assert_eq!(encoded, "AQID");
    }

    #[tokio::test]
    async fn unknown_id_is_an_error() {
        let store = InMemoryMediaStore::new();
        let err = store.base64("missing").await.unwrap_err();
        assert_eq!(err.media_id, "missing");
    }
}
