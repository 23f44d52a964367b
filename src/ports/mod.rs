//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Model Ports
//!
//! - `AIProvider` - Chat-completion model
//!
//! ## Speech Ports
//!
//! - `SpeechSynthesizer` - Text-to-speech for voice replies
//! - `SpeechRecognizer` - Speech-to-text for voice input
//!
//! ## Storage Ports
//!
//! - `ConversationLog` - Append-only turn history
//! - `AudioStore` - Uploaded and synthesized audio files

mod ai_provider;
mod audio_store;
mod conversation_log;
mod speech_recognizer;
mod speech_synthesizer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, TokenUsage,
};
pub use audio_store::{AudioKind, AudioRef, AudioStore, AudioStoreError, AUDIO_URL_PREFIX};
pub use conversation_log::{ConversationLog, LogError};
pub use speech_recognizer::{RecognitionError, SpeechRecognizer};
pub use speech_synthesizer::{AudioFormat, SpeechSynthesizer, SynthesisError, SynthesizedAudio};
