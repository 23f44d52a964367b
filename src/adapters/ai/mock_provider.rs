//! Scripted chat model for tests.
//!
//! Each call pops the next scripted outcome: a raw model output (valid JSON,
//! prose, a truncated object) or an injected `AIError`. Every request is
//! recorded so tests can assert how many calls the generator made and what
//! context it sent.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"content": "半"#)
//!     .with_response(r#"{"content":"hi","emotion":"calm","output_type":"text"}"#);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason};

/// Output returned once the script runs out.
const UNSCRIPTED_OUTPUT: &str = "Mock response";

const MOCK_MODEL: &str = "mock-model";

/// Chat model double driven by a script of outcomes.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<Result<CompletionResponse, AIError>>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn scripted(content: impl Into<String>, finish_reason: FinishReason) -> CompletionResponse {
    CompletionResponse {
        model: MOCK_MODEL.to_string(),
        finish_reason,
        ..CompletionResponse::text(content)
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw model output that finished normally.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.script).push_back(Ok(scripted(content, FinishReason::Stop)));
        self
    }

    /// Queues a raw model output that hit the token limit.
    pub fn with_truncated_response(self, content: impl Into<String>) -> Self {
        lock(&self.script).push_back(Ok(scripted(content, FinishReason::Length)));
        self
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.script).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Ok(scripted(UNSCRIPTED_OUTPUT, FinishReason::Stop)))
    }
}
