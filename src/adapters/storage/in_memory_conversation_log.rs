//! In-Memory Conversation Log Adapter
//!
//! Keeps turns in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::LoggedTurn;
use crate::ports::{ConversationLog, LogError};

/// In-memory append-only log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationLog {
    turns: Arc<RwLock<Vec<LoggedTurn>>>,
}

impl InMemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log pre-populated with `turns`.
    pub fn with_turns(turns: Vec<LoggedTurn>) -> Self {
        Self {
            turns: Arc::new(RwLock::new(turns)),
        }
    }

    /// Get the number of stored turns
    pub async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.turns.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationLog for InMemoryConversationLog {
    async fn read_all(&self) -> Result<Vec<LoggedTurn>, LogError> {
        Ok(self.turns.read().await.clone())
    }

    async fn append(&self, turn: &LoggedTurn) -> Result<(), LogError> {
        self.turns.write().await.push(turn.clone());
        Ok(())
    }
}
