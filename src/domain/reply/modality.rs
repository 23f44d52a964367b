//! Reply modality.
//!
//! A reply asking for `voice` is synthesized into audio. Voice is an
//! enhancement: when synthesis is unavailable the same reply is delivered as
//! text and never carries an audio reference.

use serde::Serialize;

use super::schema::StructuredReply;
use crate::domain::foundation::OutputType;

/// What the delivery stage must do with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalityDecision {
    TextOnly,
    Synthesize,
}

/// Decides delivery for a validated reply.
pub fn decide(reply: &StructuredReply) -> ModalityDecision {
    match reply.output_type() {
        OutputType::Text => ModalityDecision::TextOnly,
        OutputType::Voice => ModalityDecision::Synthesize,
    }
}

/// A reply ready for the user, with its delivery outcome.
///
/// # Invariants
///
/// - `audio_url` is `Some` only when `reply.output_type()` is `Voice`
/// - a degraded reply is always `Text` with no audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedReply {
    reply: StructuredReply,
    audio_url: Option<String>,
    degraded: bool,
}

impl ResolvedReply {
    /// Delivers a reply as text, whatever it asked for.
    pub fn text(reply: StructuredReply) -> Self {
        Self {
            reply: reply.into_text(),
            audio_url: None,
            degraded: false,
        }
    }

    /// Delivers a voice reply with its synthesized audio.
    pub fn voiced(reply: StructuredReply, audio_url: impl Into<String>) -> Self {
        debug_assert!(reply.output_type().is_voice());
        Self {
            reply,
            audio_url: Some(audio_url.into()),
            degraded: false,
        }
    }

    /// Delivers a voice reply as text after synthesis failed.
    pub fn degraded(reply: StructuredReply) -> Self {
        Self {
            reply: reply.into_text(),
            audio_url: None,
            degraded: true,
        }
    }

    pub fn reply(&self) -> &StructuredReply {
        &self.reply
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    /// True when voice was requested but could not be produced.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn into_parts(self) -> (StructuredReply, Option<String>) {
        (self.reply, self.audio_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(output_type: OutputType) -> StructuredReply {
        StructuredReply::new("晚安", "温柔", output_type).unwrap()
    }

    #[test]
    fn text_reply_is_not_synthesized() {
        assert_eq!(decide(&reply(OutputType::Text)), ModalityDecision::TextOnly);
    }

    #[test]
    fn voice_reply_is_synthesized() {
        assert_eq!(decide(&reply(OutputType::Voice)), ModalityDecision::Synthesize);
    }

    #[test]
    fn voiced_keeps_voice_and_audio() {
        let resolved = ResolvedReply::voiced(reply(OutputType::Voice), "/audio/reply_1.wav");

        assert_eq!(resolved.reply().output_type(), OutputType::Voice);
        assert_eq!(resolved.audio_url(), Some("/audio/reply_1.wav"));
        assert!(!resolved.is_degraded());
    }

    #[test]
    fn degraded_is_text_without_audio() {
        let resolved = ResolvedReply::degraded(reply(OutputType::Voice));

        assert_eq!(resolved.reply().content(), "晚安");
        assert_eq!(resolved.reply().emotion(), "温柔");
        assert_eq!(resolved.reply().output_type(), OutputType::Text);
        assert_eq!(resolved.audio_url(), None);
        assert!(resolved.is_degraded());
    }

    #[test]
    fn text_never_carries_audio() {
        let resolved = ResolvedReply::text(reply(OutputType::Text));
        assert_eq!(resolved.audio_url(), None);
        assert!(!resolved.is_degraded());
    }
}
