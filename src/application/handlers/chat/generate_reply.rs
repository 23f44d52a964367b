//! Reply generation.
//!
//! Drives one request through call → validate → repair → retry:
//!
//! - valid output → `Done`
//! - invalid output → single-pass repair → `Done`
//! - unrepairable output → one regenerate call, validated strictly → `Done` or `Fallback`
//! - any transport error → `Fallback` immediately
//!
//! The generator never returns an error. Callers always receive a reply,
//! at worst the apology sentinel.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::conversation::Turn;
use crate::domain::foundation::StateMachine;
use crate::domain::reply::{
    fallback_reply, repair, validate, GenerationState, Locale, StructuredReply,
};
use crate::ports::{AIProvider, CompletionRequest};

/// Upper bound on model invocations per request: the first call plus one
/// regenerate.
pub const MAX_MODEL_CALLS: u32 = 2;

/// Sampling and locale settings for reply generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Language of the fallback apology.
    pub locale: Locale,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
            locale: Locale::default(),
        }
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub reply: StructuredReply,
    /// `Done` or `Fallback`.
    pub final_state: GenerationState,
    /// Model invocations made, 1 or 2.
    pub model_calls: u32,
    /// True when the reply came out of repair rather than straight validation.
    pub repaired: bool,
    /// True when any model call stopped at the token limit.
    pub truncated: bool,
}

impl GenerationOutcome {
    pub fn is_fallback(&self) -> bool {
        self.final_state == GenerationState::Fallback
    }
}

/// Bookkeeping for a single run.
struct Run {
    request_id: String,
    state: GenerationState,
    model_calls: u32,
    truncated: bool,
}

impl Run {
    fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            state: GenerationState::Requested,
            model_calls: 0,
            truncated: false,
        }
    }

    fn advance(&mut self, next: GenerationState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "illegal generation transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(
            request_id = %self.request_id,
            from = ?self.state,
            to = ?next,
            "generation state"
        );
        self.state = next;
    }

    fn finish(self, reply: StructuredReply, repaired: bool) -> GenerationOutcome {
        GenerationOutcome {
            reply,
            final_state: self.state,
            model_calls: self.model_calls,
            repaired,
            truncated: self.truncated,
        }
    }
}

/// Produces a validated reply for an assembled context.
pub struct ReplyGenerator<A>
where
    A: AIProvider,
{
    ai_provider: Arc<A>,
    config: GenerationConfig,
}

impl<A> ReplyGenerator<A>
where
    A: AIProvider + 'static,
{
    pub fn new(ai_provider: Arc<A>, config: GenerationConfig) -> Self {
        Self { ai_provider, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs the generation state machine for `context`.
    ///
    /// `context` is the full ordered turn sequence: persona, history, new
    /// user input. The same sequence is sent on the regenerate call.
    pub async fn generate(&self, context: &[Turn]) -> GenerationOutcome {
        let mut run = Run::new();
        let request = CompletionRequest::from_turns(run.request_id.clone(), context)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        // First call.
        let Some(raw) = self.call_model(&mut run, &request).await else {
            return self.fallback(run);
        };

        run.advance(GenerationState::Validating);
        let violation = match validate(&raw) {
            Ok(reply) => {
                run.advance(GenerationState::Done);
                return run.finish(reply, false);
            }
            Err(violation) => violation,
        };

        run.advance(GenerationState::Repairing);
        let unrecoverable = match repair(&raw) {
            Ok(reply) => {
                tracing::warn!(
                    request_id = %run.request_id,
                    violation = %violation,
                    "model output repaired"
                );
                run.advance(GenerationState::Done);
                return run.finish(reply, true);
            }
            Err(e) => e,
        };

        tracing::warn!(
            request_id = %run.request_id,
            reason = %unrecoverable,
            "model output unrecoverable, regenerating once"
        );
        run.advance(GenerationState::Retrying);

        // Regenerate; validated strictly, no second repair.
        let Some(raw) = self.call_model(&mut run, &request).await else {
            return self.fallback(run);
        };

        run.advance(GenerationState::Validating);
        match validate(&raw) {
            Ok(reply) => {
                run.advance(GenerationState::Done);
                run.finish(reply, false)
            }
            Err(violation) => {
                tracing::warn!(
                    request_id = %run.request_id,
                    violation = %violation,
                    "regenerated output still invalid"
                );
                self.fallback(run)
            }
        }
    }

    /// One model invocation. `None` means a transport error was logged.
    async fn call_model(&self, run: &mut Run, request: &CompletionRequest) -> Option<String> {
        run.advance(GenerationState::AwaitingModel);
        run.model_calls += 1;
        debug_assert!(run.model_calls <= MAX_MODEL_CALLS);

        tracing::debug!(
            request_id = %run.request_id,
            attempt = run.model_calls,
            messages = request.messages.len(),
            "calling model"
        );

        match self.ai_provider.complete(request.clone()).await {
            Ok(response) => {
                tracing::debug!(
                    request_id = %run.request_id,
                    attempt = run.model_calls,
                    model = %response.model,
                    total_tokens = response.usage.total_tokens,
                    finish_reason = ?response.finish_reason,
                    raw = %response.content,
                    "model responded"
                );
                if response.finish_reason.is_truncated() {
                    run.truncated = true;
                    tracing::warn!(
                        request_id = %run.request_id,
                        attempt = run.model_calls,
                        max_tokens = ?request.max_tokens,
                        "model output hit the token limit"
                    );
                }
                Some(response.content)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %run.request_id,
                    attempt = run.model_calls,
                    error = %e,
                    "model call failed"
                );
                None
            }
        }
    }

    fn fallback(&self, mut run: Run) -> GenerationOutcome {
        run.advance(GenerationState::Fallback);
        tracing::warn!(
            request_id = %run.request_id,
            model_calls = run.model_calls,
            "replying with fallback"
        );
        run.finish(fallback_reply(self.config.locale), false)
    }
}
