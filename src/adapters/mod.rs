//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completion providers (OpenAI-compatible HTTP, mock)
//! - `speech` - Speech synthesis and recognition (HTTP, mock, disabled)
//! - `storage` - Conversation log and audio files (filesystem, in-memory)

pub mod ai;
pub mod speech;
pub mod storage;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use speech::{
    MockSpeechRecognizer, MockSpeechSynthesizer, NoSpeechBackend, OpenAISpeech,
    OpenAISpeechConfig, SpeechBackend,
};
pub use storage::{
    InMemoryAudioStore, InMemoryConversationLog, JsonlConversationLog, LocalAudioStore,
};
