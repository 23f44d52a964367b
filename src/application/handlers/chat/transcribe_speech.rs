//! TranscribeSpeech command handler.
//!
//! Stores an uploaded recording, transcribes it, and records the transcript
//! as a voice user turn. The follow-up chat turn is sent with
//! `SendChatMessageCommand::voice`, which does not log the input again.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::LoggedTurn;
use crate::ports::{
    AudioFormat, AudioKind, AudioStore, AudioStoreError, ConversationLog, RecognitionError,
    SpeechRecognizer,
};

/// Command to transcribe a recording.
#[derive(Debug, Clone)]
pub struct TranscribeSpeechCommand {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
}

impl TranscribeSpeechCommand {
    pub fn new(audio: Vec<u8>, format: AudioFormat) -> Self {
        Self { audio, format }
    }
}

/// Errors that can occur when transcribing speech.
#[derive(Debug, Clone, Error)]
pub enum TranscribeSpeechError {
    /// No audio was provided.
    #[error("No audio file provided")]
    NoAudio,

    /// The recording could not be stored.
    #[error("Audio storage error: {0}")]
    Storage(#[from] AudioStoreError),

    /// The recognizer failed.
    #[error("Recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// The recording contained no recognizable speech.
    #[error("No speech recognized")]
    EmptyTranscript,
}

/// Result of a transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionResult {
    /// Transcribed text, trimmed.
    pub text: String,
    /// Stored file name of the recording.
    pub file: String,
}

/// Handler for speech-to-text requests.
pub struct TranscribeSpeechHandler<R, St, L>
where
    R: SpeechRecognizer,
    St: AudioStore,
    L: ConversationLog,
{
    recognizer: Arc<R>,
    audio_store: Arc<St>,
    log: Arc<L>,
}

impl<R, St, L> TranscribeSpeechHandler<R, St, L>
where
    R: SpeechRecognizer + 'static,
    St: AudioStore + 'static,
    L: ConversationLog + 'static,
{
    pub fn new(recognizer: Arc<R>, audio_store: Arc<St>, log: Arc<L>) -> Self {
        Self {
            recognizer,
            audio_store,
            log,
        }
    }

    pub async fn handle(
        &self,
        cmd: TranscribeSpeechCommand,
    ) -> Result<TranscriptionResult, TranscribeSpeechError> {
        if cmd.audio.is_empty() {
            return Err(TranscribeSpeechError::NoAudio);
        }

        let stored = self
            .audio_store
            .save(AudioKind::Input, &cmd.audio, cmd.format)
            .await?;

        let text = self
            .recognizer
            .transcribe(&cmd.audio, cmd.format, stored.file_name())
            .await?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(TranscribeSpeechError::EmptyTranscript);
        }

        tracing::info!(file = %stored.file_name(), chars = text.chars().count(), "speech transcribed");

        if let Err(e) = self
            .log
            .append(&LoggedTurn::voice_user(text.clone(), stored.url()))
            .await
        {
            tracing::warn!(error = %e, "failed to append voice input to history");
        }

        Ok(TranscriptionResult {
            text,
            file: stored.file_name().to_string(),
        })
    }
}
