//! Fallback sentinel reply.

use serde::Deserialize;

use super::schema::StructuredReply;
use crate::domain::foundation::OutputType;

/// Emotion carried by the fallback reply.
pub const FALLBACK_EMOTION: &str = "confused";

/// Language used for user-facing apology text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Calm apology shown when no reply could be produced.
    pub fn apology(&self) -> &'static str {
        match self {
            Locale::En => "I'm sorry, I can't respond right now.",
            Locale::Zh => "对不起，我暂时无法回应。",
        }
    }
}

/// Builds the fallback sentinel for a locale. Never fails.
pub fn fallback_reply(locale: Locale) -> StructuredReply {
    StructuredReply::from_constant(locale.apology(), FALLBACK_EMOTION, OutputType::Text)
}
