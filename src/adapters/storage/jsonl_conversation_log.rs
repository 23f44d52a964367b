//! JSON-lines Conversation Log Adapter
//!
//! One `LoggedTurn` JSON object per line, appended in arrival order. Appends
//! within the process are serialized through a mutex so lines never
//! interleave.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::conversation::LoggedTurn;
use crate::ports::{ConversationLog, LogError};

/// File-backed append-only conversation log.
#[derive(Debug)]
pub struct JsonlConversationLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlConversationLog {
    /// Creates a log at `path`. The file is created on first append.
    ///
    /// # Example
    /// ```ignore
    /// let log = JsonlConversationLog::new("history.jsonl");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the log body, skipping blank and corrupt lines.
    fn parse_lines(&self, body: &str) -> Vec<LoggedTurn> {
        body.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str::<LoggedTurn>(line) {
                Ok(turn) => Some(turn),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = index + 1,
                        error = %e,
                        "skipping corrupt history line"
                    );
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl ConversationLog for JsonlConversationLog {
    async fn read_all(&self) -> Result<Vec<LoggedTurn>, LogError> {
        match fs::read_to_string(&self.path).await {
            Ok(body) => Ok(self.parse_lines(&body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(LogError::io(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn append(&self, turn: &LoggedTurn) -> Result<(), LogError> {
        let mut line =
            serde_json::to_string(turn).map_err(|e| LogError::Encode(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                LogError::io(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
