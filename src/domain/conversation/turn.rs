//! Turn and logged-turn records.
//!
//! A `Turn` is one message of the model context window. A `LoggedTurn` is the
//! persisted form of a turn in the append-only history log; it carries the
//! bookkeeping fields (timestamp, audio reference) the model never sees.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OutputType, Timestamp, DEFAULT_EMOTION};

/// Role of a turn in the model context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Persona / system preamble.
    System,
    /// End-user input.
    User,
    /// Assistant reply.
    Assistant,
}

impl TurnRole {
    /// Maps a persisted role to a context role.
    ///
    /// Only `user` stays a user turn. Every other historical role, including
    /// the legacy persona name `lyra`, is an assistant-equivalent speaker.
    pub fn from_persisted(role: &str) -> Self {
        if role == ROLE_USER {
            TurnRole::User
        } else {
            TurnRole::Assistant
        }
    }

    /// Returns the role keyword understood by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::User => ROLE_USER,
            TurnRole::Assistant => ROLE_ASSISTANT,
        }
    }
}

/// Persisted role for end-user records.
pub const ROLE_USER: &str = "user";

/// Persisted role for assistant replies.
pub const ROLE_ASSISTANT: &str = "assistant";

/// One immutable message in the context sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: TurnRole,
    content: String,
    emotion: String,
    output_type: OutputType,
}

impl Turn {
    /// Creates a turn with default emotion and text modality.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            emotion: DEFAULT_EMOTION.to_string(),
            output_type: OutputType::Text,
        }
    }

    /// Creates the system preamble turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TurnRole::System, content)
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// Sets the emotion label.
    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = emotion.into();
        self
    }

    /// Sets the output modality.
    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Builds a context turn from a persisted record.
    pub fn from_logged(record: &LoggedTurn) -> Self {
        Self::new(TurnRole::from_persisted(&record.role), record.content.clone())
            .with_emotion(record.emotion.clone())
            .with_output_type(record.output_type)
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }
}

/// A turn as stored in the history log (one JSON object per line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedTurn {
    /// Raw persisted role (`user`, `assistant`, or a legacy persona name).
    pub role: String,
    pub content: String,
    /// Local ISO-8601 time with second precision.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default = "default_emotion")]
    pub emotion: String,
    #[serde(default)]
    pub output_type: OutputType,
    /// Present only on voice records that have audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

fn default_emotion() -> String {
    DEFAULT_EMOTION.to_string()
}

impl LoggedTurn {
    /// Creates a typed user record.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            content: content.into(),
            timestamp: Timestamp::now().to_log_string(),
            emotion: default_emotion(),
            output_type: OutputType::Text,
            audio_url: None,
        }
    }

    /// Creates a transcribed user record pointing at the uploaded recording.
    pub fn voice_user(content: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            output_type: OutputType::Voice,
            audio_url: Some(audio_url.into()),
            ..Self::user(content)
        }
    }

    /// Creates an assistant record.
    ///
    /// The audio reference is dropped unless the record is a voice record.
    pub fn assistant(
        content: impl Into<String>,
        emotion: impl Into<String>,
        output_type: OutputType,
        audio_url: Option<String>,
    ) -> Self {
        Self {
            role: ROLE_ASSISTANT.to_string(),
            content: content.into(),
            timestamp: Timestamp::now().to_log_string(),
            emotion: emotion.into(),
            output_type,
            audio_url: audio_url.filter(|_| output_type.is_voice()),
        }
    }

    /// Returns true if this record was written by the end user.
    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }
}
