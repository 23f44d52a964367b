//! Speech Synthesizer Port - Text-to-speech interface.
//!
//! Voice is an optional enhancement. Callers treat every `SynthesisError` as
//! "deliver this reply as text instead".

use async_trait::async_trait;
use thiserror::Error;

/// Port for turning reply text into audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken with the configured voice.
    ///
    /// `emotion` is the reply's free-form emotion label; implementations may
    /// use it as a style hint or ignore it.
    async fn synthesize(&self, text: &str, emotion: &str) -> Result<SynthesizedAudio, SynthesisError>;
}

/// Encoded audio produced by a synthesizer or uploaded by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl SynthesizedAudio {
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }
}

/// Container format of an audio payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Webm,
}

impl AudioFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Webm => "webm",
        }
    }

    /// MIME type used for uploads.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Webm => "audio/webm",
        }
    }

    /// Parses a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" | "mpeg" => Some(AudioFormat::Mp3),
            "webm" => Some(AudioFormat::Webm),
            _ => None,
        }
    }
}

/// Errors from speech synthesis.
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    /// No synthesis backend is configured.
    #[error("speech synthesis is not configured")]
    NotConfigured,

    /// Backend returned an error status.
    #[error("synthesis backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Network failure talking to the backend.
    #[error("synthesis network error: {0}")]
    Network(String),

    /// Backend answered without audio.
    #[error("synthesis returned no audio")]
    EmptyAudio,
}

impl SynthesisError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
