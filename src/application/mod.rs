//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (send a message, transcribe speech) and the history query are
//! handled separately.

pub mod handlers;

pub use handlers::{
    ChatReply, GenerationConfig, GenerationOutcome, GetHistoryError, GetHistoryHandler,
    ModalityResolver, ReplyGenerator, SendChatMessageCommand, SendChatMessageError,
    SendChatMessageHandler, TranscribeSpeechCommand, TranscribeSpeechError,
    TranscribeSpeechHandler, TranscriptionResult, MAX_MODEL_CALLS,
};
