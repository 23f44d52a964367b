//! Mock speech adapters for testing, and the disabled backend.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{
    AudioFormat, RecognitionError, SpeechRecognizer, SpeechSynthesizer, SynthesisError,
    SynthesizedAudio,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Synthesizer that either returns fixed audio or always fails.
#[derive(Debug, Clone)]
pub struct MockSpeechSynthesizer {
    outcome: Result<SynthesizedAudio, SynthesisError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSpeechSynthesizer {
    /// Returns `bytes` as WAV audio for every call.
    pub fn succeeding(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(SynthesizedAudio::new(bytes.into(), AudioFormat::Wav)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every call with `error`.
    pub fn failing(error: SynthesisError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Texts passed to `synthesize`, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str, _emotion: &str) -> Result<SynthesizedAudio, SynthesisError> {
        lock(&self.calls).push(text.to_string());
        self.outcome.clone()
    }
}

/// Recognizer that returns a fixed transcript or always fails.
#[derive(Debug, Clone)]
pub struct MockSpeechRecognizer {
    outcome: Result<String, RecognitionError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSpeechRecognizer {
    pub fn succeeding(transcript: impl Into<String>) -> Self {
        Self {
            outcome: Ok(transcript.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: RecognitionError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// File names passed to `transcribe`, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SpeechRecognizer for MockSpeechRecognizer {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _format: AudioFormat,
        file_name: &str,
    ) -> Result<String, RecognitionError> {
        lock(&self.calls).push(file_name.to_string());
        self.outcome.clone()
    }
}

/// Speech backend used when speech is disabled or unconfigured.
///
/// Synthesis always fails, so voice replies degrade to text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeechBackend;

#[async_trait]
impl SpeechSynthesizer for NoSpeechBackend {
    async fn synthesize(&self, _text: &str, _emotion: &str) -> Result<SynthesizedAudio, SynthesisError> {
        Err(SynthesisError::NotConfigured)
    }
}

#[async_trait]
impl SpeechRecognizer for NoSpeechBackend {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _format: AudioFormat,
        _file_name: &str,
    ) -> Result<String, RecognitionError> {
        Err(RecognitionError::NotConfigured)
    }
}
