//! Conversation module - turns, history records, and model context.

mod context;
mod persona;
mod turn;

pub use context::ContextBuilder;
pub use persona::DEFAULT_PERSONA_PROMPT;
pub use turn::{LoggedTurn, Turn, TurnRole, ROLE_ASSISTANT, ROLE_USER};
