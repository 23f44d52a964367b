//! OpenAI-compatible speech adapter.
//!
//! Implements both speech ports against the `/audio/speech` and
//! `/audio/transcriptions` endpoints. Any gateway exposing those routes
//! (including Edge-TTS and Whisper bridges) works.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AudioFormat, RecognitionError, SpeechRecognizer, SpeechSynthesizer, SynthesisError,
    SynthesizedAudio,
};

/// Default synthesis voice.
pub const DEFAULT_VOICE: &str = "zh-CN-XiaoxiaoNeural";

/// Configuration for the speech adapter.
#[derive(Debug, Clone)]
pub struct OpenAISpeechConfig {
    api_key: Option<Secret<String>>,
    /// Base URL, without the `/audio/...` suffix.
    pub base_url: String,
    /// Text-to-speech model.
    pub tts_model: String,
    /// Voice name passed to the synthesizer.
    pub voice: String,
    /// Speech-to-text model.
    pub stt_model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAISpeechConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            tts_model: "tts-1".to_string(),
            voice: DEFAULT_VOICE.to_string(),
            stt_model: "whisper-1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_tts_model(mut self, model: impl Into<String>) -> Self {
        self.tts_model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_stt_model(mut self, model: impl Into<String>) -> Self {
        self.stt_model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Speech synthesis and recognition over HTTP.
#[derive(Debug)]
pub struct OpenAISpeech {
    config: OpenAISpeechConfig,
    client: Client,
}

impl OpenAISpeech {
    /// Creates the adapter.
    pub fn new(config: OpenAISpeechConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SynthesisError::network(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), route)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    async fn error_body(response: Response) -> (u16, String) {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        (status, body)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeech {
    async fn synthesize(
        &self,
        text: &str,
        emotion: &str,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        tracing::debug!(chars = text.chars().count(), emotion, voice = %self.config.voice, "synthesizing reply");

        let body = SpeechRequest {
            model: &self.config.tts_model,
            input: text,
            voice: &self.config.voice,
            response_format: AudioFormat::Wav.extension(),
        };

        let response = self
            .authorized(self.client.post(self.url("audio/speech")))
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::network(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = Self::error_body(response).await;
            return Err(SynthesisError::backend(status, message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::network(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(SynthesizedAudio::new(bytes.to_vec(), AudioFormat::Wav))
    }
}

#[async_trait]
impl SpeechRecognizer for OpenAISpeech {
    async fn transcribe(
        &self,
        audio: &[u8],
        format: AudioFormat,
        file_name: &str,
    ) -> Result<String, RecognitionError> {
        let part = Part::bytes(audio.to_vec())
            .file_name(file_name.to_string())
            .mime_str(format.mime_type())
            .map_err(|e| RecognitionError::parse(e.to_string()))?;

        let form = Form::new()
            .text("model", self.config.stt_model.clone())
            .part("file", part);

        let response = self
            .authorized(self.client.post(self.url("audio/transcriptions")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognitionError::network(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = Self::error_body(response).await;
            return Err(RecognitionError::backend(status, message));
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::parse(e.to_string()))?;

        Ok(transcription.text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}
