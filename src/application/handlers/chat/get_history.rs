//! GetHistory query handler.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::LoggedTurn;
use crate::ports::{ConversationLog, LogError};

/// Errors that can occur when reading history.
#[derive(Debug, Clone, Error)]
pub enum GetHistoryError {
    #[error("History unavailable: {0}")]
    Log(#[from] LogError),
}

/// Returns every persisted turn, oldest first.
pub struct GetHistoryHandler<L>
where
    L: ConversationLog,
{
    log: Arc<L>,
}

impl<L> GetHistoryHandler<L>
where
    L: ConversationLog + 'static,
{
    pub fn new(log: Arc<L>) -> Self {
        Self { log }
    }

    pub async fn handle(&self) -> Result<Vec<LoggedTurn>, GetHistoryError> {
        Ok(self.log.read_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryConversationLog;
    use crate::domain::foundation::OutputType;

    #[tokio::test]
    async fn returns_turns_in_append_order() {
        let log = Arc::new(InMemoryConversationLog::new());
        log.append(&LoggedTurn::user("one")).await.unwrap();
        log.append(&LoggedTurn::assistant("two", "calm", OutputType::Text, None))
            .await
            .unwrap();

        let history = GetHistoryHandler::new(log).handle().await.unwrap();

        assert_eq!(
            history.iter().map(|t| t.content.as_str()).collect::<Vec<_>>(),
            ["one", "two"]
        );
    }

    #[tokio::test]
    async fn empty_log_returns_empty_history() {
        let history = GetHistoryHandler::new(Arc::new(InMemoryConversationLog::new()))
            .handle()
            .await
            .unwrap();
        assert!(history.is_empty());
    }
}
