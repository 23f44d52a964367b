//! Conversation context building.
//!
//! Maps a read snapshot of the history log into the exact, ordered turn
//! sequence handed to the chat model: persona first, history in append order,
//! new user input last.

use super::persona::DEFAULT_PERSONA_PROMPT;
use super::turn::{LoggedTurn, Turn};

/// Builds the model context for one request.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    preamble: String,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA_PROMPT)
    }
}

impl ContextBuilder {
    /// Creates a builder with a custom persona preamble.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    /// Returns the persona preamble.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Assembles the ordered context.
    ///
    /// The snapshot is consumed read-only; no historical turn is dropped,
    /// merged, or reordered.
    pub fn build(&self, history: &[LoggedTurn], user_input: &str) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(history.len() + 2);
        turns.push(Turn::system(self.preamble.clone()));
        turns.extend(history.iter().map(Turn::from_logged));
        turns.push(Turn::user(user_input));
        turns
    }
}
