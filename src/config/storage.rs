//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where history and audio live on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON-lines conversation history file
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Directory for uploaded and synthesized audio
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_file.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.history_file"));
        }
        if self.audio_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.audio_dir"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            audio_dir: default_audio_dir(),
        }
    }
}

fn default_history_file() -> PathBuf {
    PathBuf::from("history.jsonl")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("static/audio")
}
