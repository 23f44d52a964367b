//! Chat behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::chat::DEFAULT_MAX_MESSAGE_CHARS;
use crate::domain::reply::Locale;

/// Chat turn settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Language of the fallback apology (`en` or `zh`)
    #[serde(default)]
    pub locale: Locale,

    /// Longest accepted user message, in characters
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_message_chars == 0 {
            return Err(ValidationError::InvalidMessageLimit);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            max_message_chars: default_max_message_chars(),
        }
    }
}

fn default_max_message_chars() -> usize {
    DEFAULT_MAX_MESSAGE_CHARS
}
