//! Conversation Log Port - Append-only history of turns.
//!
//! # Contract
//!
//! Implementations must:
//! - Return records in append order
//! - Never rewrite or drop an already appended record
//! - Serialize concurrent appends so records do not interleave

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::LoggedTurn;

/// Port for the persisted conversation history.
#[async_trait]
pub trait ConversationLog: Send + Sync {
    /// Read a snapshot of every record, oldest first.
    ///
    /// A missing log reads as empty.
    async fn read_all(&self) -> Result<Vec<LoggedTurn>, LogError>;

    /// Append one record at the end of the log.
    async fn append(&self, turn: &LoggedTurn) -> Result<(), LogError>;
}

/// Errors from the conversation log.
#[derive(Debug, Clone, Error)]
pub enum LogError {
    /// IO error reading or writing the log.
    #[error("log IO error: {message}")]
    Io { message: String },

    /// A record could not be encoded.
    #[error("log encode error: {0}")]
    Encode(String),
}

impl LogError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
