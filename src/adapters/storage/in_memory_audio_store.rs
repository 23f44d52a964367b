//! In-Memory Audio Store Adapter
//!
//! Keeps saved audio in memory. Useful for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ports::{AudioFormat, AudioKind, AudioRef, AudioStore, AudioStoreError};

/// In-memory audio store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAudioStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryAudioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes stored under `file_name`.
    pub async fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(file_name).cloned()
    }

    /// Get the number of stored files
    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl AudioStore for InMemoryAudioStore {
    async fn save(
        &self,
        kind: AudioKind,
        bytes: &[u8],
        format: AudioFormat,
    ) -> Result<AudioRef, AudioStoreError> {
        if bytes.is_empty() {
            return Err(AudioStoreError::Empty);
        }
        let file_name = format!("{}_{}.{}", kind.file_prefix(), Uuid::new_v4(), format.extension());
        self.files
            .write()
            .await
            .insert(file_name.clone(), bytes.to_vec());
        Ok(AudioRef::new(file_name))
    }
}
