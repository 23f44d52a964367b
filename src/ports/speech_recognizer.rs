//! Speech Recognizer Port - Speech-to-text interface.

use async_trait::async_trait;
use thiserror::Error;

use super::speech_synthesizer::AudioFormat;

/// Port for transcribing recorded user speech.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe an uploaded recording into text.
    ///
    /// `file_name` is forwarded to backends that infer the container from it.
    async fn transcribe(
        &self,
        audio: &[u8],
        format: AudioFormat,
        file_name: &str,
    ) -> Result<String, RecognitionError>;
}

/// Errors from speech recognition.
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    /// No recognition backend is configured.
    #[error("speech recognition is not configured")]
    NotConfigured,

    /// Backend returned an error status.
    #[error("recognition backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Network failure talking to the backend.
    #[error("recognition network error: {0}")]
    Network(String),

    /// Backend response could not be understood.
    #[error("recognition parse error: {0}")]
    Parse(String),
}

impl RecognitionError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
