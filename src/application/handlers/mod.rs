//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod chat;

pub use chat::{
    ChatReply, GenerationConfig, GenerationOutcome, GetHistoryError, GetHistoryHandler,
    ModalityResolver, ReplyGenerator, SendChatMessageCommand, SendChatMessageError,
    SendChatMessageHandler, TranscribeSpeechCommand, TranscribeSpeechError,
    TranscribeSpeechHandler, TranscriptionResult, MAX_MODEL_CALLS,
};
