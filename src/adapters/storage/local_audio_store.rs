//! Local filesystem audio store.
//!
//! Writes each file with a write-to-temp-then-rename pattern:
//! 1. Write bytes to `{name}.tmp`
//! 2. Sync to disk
//! 3. Rename to the final name
//!
//! A crash mid-write never leaves a truncated audio file under its final name,
//! and a failed write or rename removes its temp file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{AudioFormat, AudioKind, AudioRef, AudioStore, AudioStoreError};

/// Audio store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalAudioStore {
    base_path: PathBuf,
}

impl LocalAudioStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Picks a fresh file name for `kind`.
    fn file_name(kind: AudioKind, format: AudioFormat) -> String {
        let id = match kind {
            AudioKind::Reply => Uuid::new_v4().hyphenated().to_string(),
            AudioKind::Input => Uuid::new_v4().simple().to_string(),
        };
        format!("{}_{}.{}", kind.file_prefix(), id, format.extension())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Writes `bytes` to `temp_path`, then renames it to `final_path`.
///
/// On any failure the temp file is removed before the error is returned.
async fn persist(
    temp_path: &Path,
    final_path: &Path,
    bytes: &[u8],
) -> Result<(), AudioStoreError> {
    let result = match write_synced(temp_path, bytes).await {
        Ok(()) => fs::rename(temp_path, final_path).await,
        Err(e) => Err(e),
    };

    result.map_err(|e| {
        // Best effort; the temp file may never have been created.
        let _ = std::fs::remove_file(temp_path);
        AudioStoreError::io(format!(
            "Failed to write {}: {}",
            final_path.display(),
            e
        ))
    })
}

#[async_trait]
impl AudioStore for LocalAudioStore {
    async fn save(
        &self,
        kind: AudioKind,
        bytes: &[u8],
        format: AudioFormat,
    ) -> Result<AudioRef, AudioStoreError> {
        if bytes.is_empty() {
            return Err(AudioStoreError::Empty);
        }

        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            AudioStoreError::io(format!(
                "Failed to create {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let file_name = Self::file_name(kind, format);
        let final_path = self.base_path.join(&file_name);
        let temp_path = self.base_path.join(format!("{}.tmp", file_name));

        persist(&temp_path, &final_path, bytes).await?;

        tracing::debug!(file = %file_name, bytes = bytes.len(), "stored audio");
        Ok(AudioRef::new(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reply_audio_is_written_as_reply_wav() {
        let dir = TempDir::new().unwrap();
        let store = LocalAudioStore::new(dir.path());

        let audio = store
            .save(AudioKind::Reply, b"RIFF", AudioFormat::Wav)
            .await
            .unwrap();

        assert!(audio.file_name().starts_with("reply_"));
        assert!(audio.file_name().ends_with(".wav"));
        assert!(audio.url().starts_with("/audio/reply_"));
        let written = std::fs::read(dir.path().join(audio.file_name())).unwrap();
        assert_eq!(written, b"RIFF");
    }

    #[tokio::test]
    async fn input_audio_is_written_as_input_webm() {
        let dir = TempDir::new().unwrap();
        let store = LocalAudioStore::new(dir.path().join("static/audio"));

        let audio = store
            .save(AudioKind::Input, b"webm", AudioFormat::Webm)
            .await
            .unwrap();

        assert!(audio.file_name().starts_with("input_"));
        assert!(audio.file_name().ends_with(".webm"));
        assert!(store.base_path().join(audio.file_name()).exists());
    }

    #[tokio::test]
    async fn no_temp_files_remain() {
        let dir = TempDir::new().unwrap();
        let store = LocalAudioStore::new(dir.path());

        store.save(AudioKind::Reply, b"a", AudioFormat::Wav).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_no_temp_file() {
        // Given: the final name is taken by a directory, so the move fails
        let dir = TempDir::new().unwrap();
        let temp_path = dir.path().join("reply_x.wav.tmp");
        let final_path = dir.path().join("reply_x.wav");
        std::fs::create_dir(&final_path).unwrap();
        std::fs::write(final_path.join("occupied"), b"x").unwrap();

        // When
        let result = persist(&temp_path, &final_path, b"RIFF").await;

        // Then: the error is reported and the temp file is gone
        assert!(matches!(result, Err(AudioStoreError::Io { .. })));
        assert!(!temp_path.exists());
    }

    #[tokio::test]
    async fn unwritable_temp_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let temp_path = dir.path().join("missing").join("input_x.webm.tmp");

        let result = persist(&temp_path, &dir.path().join("input_x.webm"), b"webm").await;

        assert!(matches!(result, Err(AudioStoreError::Io { .. })));
        assert!(!temp_path.exists());
    }

    #[tokio::test]
    async fn names_are_unique() {
        let dir = TempDir::new().unwrap();
        let store = LocalAudioStore::new(dir.path());

        let a = store.save(AudioKind::Reply, b"a", AudioFormat::Wav).await.unwrap();
        let b = store.save(AudioKind::Reply, b"b", AudioFormat::Wav).await.unwrap();

        assert_ne!(a.file_name(), b.file_name());
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = LocalAudioStore::new(dir.path());

        let err = store.save(AudioKind::Reply, b"", AudioFormat::Wav).await.unwrap_err();
        assert!(matches!(err, AudioStoreError::Empty));
    }
}
