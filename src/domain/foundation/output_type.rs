//! Output modality of a turn or reply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// How a reply is delivered to the end user.
///
/// The wire values `text` and `voice` are part of the persisted log format
/// and of the model's response contract; they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Plain text display.
    #[default]
    Text,
    /// Synthesized speech.
    Voice,
}

impl OutputType {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Text => "text",
            OutputType::Voice => "voice",
        }
    }

    /// Returns true if this modality needs speech synthesis.
    pub fn is_voice(&self) -> bool {
        matches!(self, OutputType::Voice)
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputType::Text),
            "voice" => Ok(OutputType::Voice),
            other => Err(ValidationError::invalid_format(
                "output_type",
                format!("expected 'text' or 'voice', got '{}'", other),
            )),
        }
    }
}
