//! Speech backend selected at startup.
//!
//! Wraps either the HTTP speech adapter or the disabled backend so the
//! composition root can pick one from configuration while handlers stay
//! generic over a single concrete type.

use async_trait::async_trait;

use super::{NoSpeechBackend, OpenAISpeech};
use crate::ports::{
    AudioFormat, RecognitionError, SpeechRecognizer, SpeechSynthesizer, SynthesisError,
    SynthesizedAudio,
};

/// Speech backend chosen from configuration.
#[derive(Debug)]
pub enum SpeechBackend {
    /// OpenAI-compatible speech endpoint.
    Http(OpenAISpeech),
    /// Speech disabled. Synthesis and transcription report `NotConfigured`.
    Disabled(NoSpeechBackend),
}

impl SpeechBackend {
    /// Returns true when a real speech endpoint is configured.
    pub fn is_enabled(&self) -> bool {
        matches!(self, SpeechBackend::Http(_))
    }
}

impl From<OpenAISpeech> for SpeechBackend {
    fn from(speech: OpenAISpeech) -> Self {
        SpeechBackend::Http(speech)
    }
}

impl Default for SpeechBackend {
    fn default() -> Self {
        SpeechBackend::Disabled(NoSpeechBackend)
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechBackend {
    async fn synthesize(&self, text: &str, emotion: &str) -> Result<SynthesizedAudio, SynthesisError> {
        match self {
            SpeechBackend::Http(speech) => speech.synthesize(text, emotion).await,
            SpeechBackend::Disabled(none) => none.synthesize(text, emotion).await,
        }
    }
}

#[async_trait]
impl SpeechRecognizer for SpeechBackend {
    async fn transcribe(
        &self,
        audio: &[u8],
        format: AudioFormat,
        file_name: &str,
    ) -> Result<String, RecognitionError> {
        match self {
            SpeechBackend::Http(speech) => speech.transcribe(audio, format, file_name).await,
            SpeechBackend::Disabled(none) => none.transcribe(audio, format, file_name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::speech::OpenAISpeechConfig;

    #[tokio::test]
    async fn default_backend_is_disabled() {
        let backend = SpeechBackend::default();

        assert!(!backend.is_enabled());
        assert!(matches!(
            backend.synthesize("hi", "calm").await,
            Err(SynthesisError::NotConfigured)
        ));
        assert!(matches!(
            backend.transcribe(b"x", AudioFormat::Webm, "input.webm").await,
            Err(RecognitionError::NotConfigured)
        ));
    }

    #[test]
    fn http_backend_reports_enabled() {
        let speech = OpenAISpeech::new(OpenAISpeechConfig::new("http://localhost:5050/v1")).unwrap();

        assert!(SpeechBackend::from(speech).is_enabled());
    }
}
