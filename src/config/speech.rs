//! Speech configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::speech::{OpenAISpeechConfig, DEFAULT_VOICE};

/// Speech synthesis and recognition configuration
///
/// Speech is optional. When disabled, voice replies are delivered as text
/// and transcription requests fail.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Whether to use a speech backend at all
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the OpenAI-compatible speech endpoint
    pub base_url: Option<String>,

    /// Optional bearer token
    pub api_key: Option<String>,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Synthesis voice
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
    /// Builds the adapter configuration. `None` when speech is off.
    pub fn adapter_config(&self) -> Option<OpenAISpeechConfig> {
        if !self.enabled {
            return None;
        }
        let base_url = self.base_url.as_ref().filter(|u| !u.is_empty())?;

        let mut config = OpenAISpeechConfig::new(base_url.clone())
            .with_tts_model(self.tts_model.clone())
            .with_voice(self.voice.clone())
            .with_stt_model(self.stt_model.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            config = config.with_api_key(key.clone());
        }
        Some(config)
    }

    /// Validate speech configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        let base_url = self
            .base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::MissingRequired("LYRA__SPEECH__BASE_URL"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidUrl("speech.base_url"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            api_key: None,
            tts_model: default_tts_model(),
            voice: default_voice(),
            stt_model: default_stt_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_timeout() -> u64 {
    60
}
