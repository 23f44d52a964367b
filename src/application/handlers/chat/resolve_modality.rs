//! Modality resolution.
//!
//! Turns a validated reply into a deliverable one. Voice replies are
//! synthesized and stored; if either step fails the reply is delivered as text
//! with no audio reference. Never fails.

use std::sync::Arc;

use crate::domain::reply::{decide, ModalityDecision, ResolvedReply, StructuredReply};
use crate::ports::{AudioKind, AudioStore, SpeechSynthesizer};

/// Resolves reply modality against a synthesizer and an audio store.
pub struct ModalityResolver<S, St>
where
    S: SpeechSynthesizer,
    St: AudioStore,
{
    synthesizer: Arc<S>,
    audio_store: Arc<St>,
}

impl<S, St> ModalityResolver<S, St>
where
    S: SpeechSynthesizer + 'static,
    St: AudioStore + 'static,
{
    pub fn new(synthesizer: Arc<S>, audio_store: Arc<St>) -> Self {
        Self {
            synthesizer,
            audio_store,
        }
    }

    pub async fn resolve(&self, reply: StructuredReply) -> ResolvedReply {
        match decide(&reply) {
            ModalityDecision::TextOnly => ResolvedReply::text(reply),
            ModalityDecision::Synthesize => self.synthesize(reply).await,
        }
    }

    async fn synthesize(&self, reply: StructuredReply) -> ResolvedReply {
        let audio = match self
            .synthesizer
            .synthesize(reply.content(), reply.emotion())
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!(error = %e, "speech synthesis failed, replying as text");
                return ResolvedReply::degraded(reply);
            }
        };

        match self
            .audio_store
            .save(AudioKind::Reply, &audio.bytes, audio.format)
            .await
        {
            Ok(stored) => ResolvedReply::voiced(reply, stored.url()),
            Err(e) => {
                tracing::warn!(error = %e, "storing reply audio failed, replying as text");
                ResolvedReply::degraded(reply)
            }
        }
    }
}
