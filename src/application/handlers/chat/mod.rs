//! Chat handlers.
//!
//! - `ReplyGenerator` - call/validate/repair/retry state machine
//! - `ModalityResolver` - voice synthesis with degrade-to-text
//! - `SendChatMessageHandler` - one user turn end to end
//! - `TranscribeSpeechHandler` - recorded speech to a logged user turn
//! - `GetHistoryHandler` - persisted history

mod generate_reply;
mod get_history;
mod resolve_modality;
mod send_chat_message;
mod transcribe_speech;

pub use generate_reply::{GenerationConfig, GenerationOutcome, ReplyGenerator, MAX_MODEL_CALLS};
pub use get_history::{GetHistoryError, GetHistoryHandler};
pub use resolve_modality::ModalityResolver;
pub use send_chat_message::{
    ChatReply, SendChatMessageCommand, SendChatMessageError, SendChatMessageHandler,
    DEFAULT_MAX_MESSAGE_CHARS,
};
pub use transcribe_speech::{
    TranscribeSpeechCommand, TranscribeSpeechError, TranscribeSpeechHandler, TranscriptionResult,
};
