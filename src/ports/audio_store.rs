//! Audio Store Port - Persistence for uploaded and synthesized audio.
//!
//! # File Organization
//!
//! ```text
//! {audio_dir}/reply_{uuid}.{ext}    synthesized replies
//! {audio_dir}/input_{uuid}.{ext}    user recordings
//! ```
//!
//! Stored files are served to clients under `/audio/{file_name}`.

use async_trait::async_trait;
use thiserror::Error;

use super::speech_synthesizer::AudioFormat;

/// URL prefix under which stored audio is reachable.
pub const AUDIO_URL_PREFIX: &str = "/audio";

/// Port for writing audio files.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Persist audio bytes under a fresh, unique file name.
    ///
    /// Writes atomically; a failed save leaves no partial file behind.
    async fn save(
        &self,
        kind: AudioKind,
        bytes: &[u8],
        format: AudioFormat,
    ) -> Result<AudioRef, AudioStoreError>;
}

/// Why the audio is being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    /// Synthesized assistant reply.
    Reply,
    /// Uploaded user recording.
    Input,
}

impl AudioKind {
    pub fn file_prefix(&self) -> &'static str {
        match self {
            AudioKind::Reply => "reply",
            AudioKind::Input => "input",
        }
    }
}

/// Reference to a stored audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRef {
    file_name: String,
}

impl AudioRef {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Client-facing URL of the file.
    pub fn url(&self) -> String {
        format!("{}/{}", AUDIO_URL_PREFIX, self.file_name)
    }
}

/// Errors from the audio store.
#[derive(Debug, Clone, Error)]
pub enum AudioStoreError {
    /// IO error writing the file.
    #[error("audio IO error: {message}")]
    Io { message: String },

    /// Refused to store an empty payload.
    #[error("audio payload is empty")]
    Empty,
}

impl AudioStoreError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for AudioStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
