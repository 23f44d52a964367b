//! Storage Adapters
//!
//! Implementations of the `ConversationLog` and `AudioStore` ports.
//!
//! ## Available Adapters
//!
//! - **JsonlConversationLog** - Append-only JSON-lines history file
//! - **InMemoryConversationLog** - History in memory (testing/development)
//! - **LocalAudioStore** - Audio files in a local directory
//! - **InMemoryAudioStore** - Audio in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{JsonlConversationLog, LocalAudioStore};
//!
//! let log = JsonlConversationLog::new("history.jsonl");
//! let audio = LocalAudioStore::new("static/audio");
//! ```

mod in_memory_audio_store;
mod in_memory_conversation_log;
mod jsonl_conversation_log;
mod local_audio_store;

pub use in_memory_audio_store::InMemoryAudioStore;
pub use in_memory_conversation_log::InMemoryConversationLog;
pub use jsonl_conversation_log::JsonlConversationLog;
pub use local_audio_store::LocalAudioStore;
