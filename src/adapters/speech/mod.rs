//! Speech Adapters.
//!
//! - `OpenAISpeech` - `/audio/speech` and `/audio/transcriptions` over HTTP
//! - `NoSpeechBackend` - Used when speech is disabled; voice degrades to text
//! - `SpeechBackend` - HTTP or disabled, chosen from configuration
//! - `MockSpeechSynthesizer`, `MockSpeechRecognizer` - Configurable test doubles

mod mock_speech;
mod openai_speech;
mod speech_backend;

pub use mock_speech::{MockSpeechRecognizer, MockSpeechSynthesizer, NoSpeechBackend};
pub use openai_speech::{OpenAISpeech, OpenAISpeechConfig, DEFAULT_VOICE};
pub use speech_backend::SpeechBackend;
