//! SendChatMessage command handler.
//!
//! Handles one user chat turn end to end: validate the input, record it,
//! generate a reply, resolve its modality, record the reply, and return it.
//! Once the input is accepted the handler always produces a reply.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use super::generate_reply::ReplyGenerator;
use super::resolve_modality::ModalityResolver;
use crate::domain::conversation::{ContextBuilder, LoggedTurn};
use crate::domain::foundation::OutputType;
use crate::domain::reply::GenerationState;
use crate::ports::{AIProvider, AudioStore, ConversationLog, SpeechSynthesizer};

/// Default upper bound on message length, in characters.
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;

/// Command to send a chat message.
#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    /// The message text.
    pub message: String,
    /// True when the message came from speech transcription and is already
    /// in the log.
    pub is_voice: bool,
}

impl SendChatMessageCommand {
    /// Creates a typed-message command.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_voice: false,
        }
    }

    /// Creates a command for an already transcribed and logged voice message.
    pub fn voice(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_voice: true,
        }
    }
}

/// Errors that can occur when sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendChatMessageError {
    /// Message is empty or whitespace only.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// Message exceeds the configured length.
    #[error("Validation error: message is {length} characters, limit is {max}")]
    MessageTooLong { length: usize, max: usize },
}

/// Reply returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub emotion: String,
    pub output_type: OutputType,
    pub audio_url: Option<String>,
}

/// Handler for chat turns.
pub struct SendChatMessageHandler<A, S, St, L>
where
    A: AIProvider,
    S: SpeechSynthesizer,
    St: AudioStore,
    L: ConversationLog,
{
    context_builder: ContextBuilder,
    generator: ReplyGenerator<A>,
    resolver: ModalityResolver<S, St>,
    log: Arc<L>,
    max_message_chars: usize,
}

impl<A, S, St, L> SendChatMessageHandler<A, S, St, L>
where
    A: AIProvider + 'static,
    S: SpeechSynthesizer + 'static,
    St: AudioStore + 'static,
    L: ConversationLog + 'static,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(
        context_builder: ContextBuilder,
        generator: ReplyGenerator<A>,
        resolver: ModalityResolver<S, St>,
        log: Arc<L>,
    ) -> Self {
        Self {
            context_builder,
            generator,
            resolver,
            log,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }

    /// Sets the maximum accepted message length.
    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = max;
        self
    }

    /// Handles a send chat message command.
    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<ChatReply, SendChatMessageError> {
        let message = cmd.message.trim();
        if message.is_empty() {
            return Err(SendChatMessageError::EmptyMessage);
        }
        let length = message.chars().count();
        if length > self.max_message_chars {
            return Err(SendChatMessageError::MessageTooLong {
                length,
                max: self.max_message_chars,
            });
        }

        let mut history = match self.log.read_all().await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "history unavailable, replying without it");
                Vec::new()
            }
        };

        if cmd.is_voice {
            // Transcription already logged this input; keep it out of history
            // so the model sees it once, as the new turn.
            if history
                .last()
                .is_some_and(|last| last.is_user() && last.content == message)
            {
                history.pop();
            }
        } else {
            self.record(&LoggedTurn::user(message)).await;
        }

        let context = self.context_builder.build(&history, message);
        let outcome = self.generator.generate(&context).await;

        tracing::info!(
            state = ?outcome.final_state,
            model_calls = outcome.model_calls,
            repaired = outcome.repaired,
            truncated = outcome.truncated,
            "reply generated"
        );

        let resolved = self.resolver.resolve(outcome.reply).await;
        let (reply, audio_url) = resolved.into_parts();
        let (content, emotion, output_type) = reply.into_parts();

        self.record(&LoggedTurn::assistant(
            content.clone(),
            emotion.clone(),
            output_type,
            audio_url.clone(),
        ))
        .await;

        if outcome.final_state == GenerationState::Fallback {
            tracing::warn!("chat turn answered with fallback");
        }

        Ok(ChatReply {
            message: content,
            emotion,
            output_type,
            audio_url,
        })
    }

    /// Appends to the log. A failed append is logged and the turn goes on.
    async fn record(&self, turn: &LoggedTurn) {
        if let Err(e) = self.log.append(turn).await {
            tracing::warn!(role = %turn.role, error = %e, "failed to append to history");
        }
    }
}
