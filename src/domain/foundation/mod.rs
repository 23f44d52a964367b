//! Foundation module - Shared domain primitives.
//!
//! Value objects, enums, and error types that form the vocabulary of the
//! Lyra domain.

mod errors;
mod output_type;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use output_type::OutputType;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

/// Emotion label used whenever the model (or a stored turn) does not supply one.
pub const DEFAULT_EMOTION: &str = "neutral";
