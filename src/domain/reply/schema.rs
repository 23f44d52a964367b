//! Structured reply schema.
//!
//! `StructuredReply` is the only representation of a reply that leaves the
//! generation pipeline. `validate` is the strict gate: raw model text either
//! becomes a reply here, or the caller moves on to repair.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::OutputType;

pub(crate) const FIELD_CONTENT: &str = "content";
pub(crate) const FIELD_EMOTION: &str = "emotion";
pub(crate) const FIELD_OUTPUT_TYPE: &str = "output_type";

/// Reasons a candidate is not a valid structured reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// Not parseable as a JSON object.
    #[error("reply is not a key-value structure: {0}")]
    NotAStructure(String),

    /// A required field is absent.
    #[error("reply is missing field '{0}'")]
    MissingField(&'static str),

    /// A field is present but not a string.
    #[error("reply field '{0}' must be a string")]
    NotAString(&'static str),

    /// `output_type` is outside {text, voice}.
    #[error("reply output_type '{0}' is not one of text, voice")]
    InvalidOutputType(String),

    /// `content` is empty or whitespace only.
    #[error("reply content is empty")]
    EmptyContent,
}

/// A validated reply.
///
/// # Invariants
///
/// - exactly the three fields `content`, `emotion`, `output_type`
/// - `content` is non-empty after trimming
/// - `output_type` is `text` or `voice` (enforced by the type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredReply {
    content: String,
    emotion: String,
    output_type: OutputType,
}

impl StructuredReply {
    /// Creates a reply, enforcing the content invariant.
    pub fn new(
        content: impl Into<String>,
        emotion: impl Into<String>,
        output_type: OutputType,
    ) -> Result<Self, SchemaViolation> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SchemaViolation::EmptyContent);
        }
        Ok(Self {
            content,
            emotion: emotion.into(),
            output_type,
        })
    }

    /// Builds a reply from non-empty constant text, skipping the check.
    pub(super) fn from_constant(
        content: &'static str,
        emotion: &'static str,
        output_type: OutputType,
    ) -> Self {
        Self {
            content: content.to_string(),
            emotion: emotion.to_string(),
            output_type,
        }
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

    /// Returns the same reply delivered as text.
    ///
    /// Used when the requested modality cannot be honoured.
    pub fn into_text(self) -> Self {
        Self {
            output_type: OutputType::Text,
            ..self
        }
    }

    /// Consumes the reply, returning `(content, emotion, output_type)`.
    pub fn into_parts(self) -> (String, String, OutputType) {
        (self.content, self.emotion, self.output_type)
    }
}

/// Validates raw model output against the reply schema.
///
/// Pure and side-effect free. A surrounding markdown code fence is tolerated;
/// anything else that is not a complete, well-typed object is a violation.
pub fn validate(candidate: &str) -> Result<StructuredReply, SchemaViolation> {
    let object = parse_object(candidate)?;

    let content = required_str(&object, FIELD_CONTENT)?;
    let emotion = required_str(&object, FIELD_EMOTION)?;
    let output_type = required_str(&object, FIELD_OUTPUT_TYPE)?;

    let output_type = output_type
        .parse::<OutputType>()
        .map_err(|_| SchemaViolation::InvalidOutputType(output_type.to_string()))?;

    StructuredReply::new(content, emotion, output_type)
}

/// Parses the candidate into a JSON object.
pub(crate) fn parse_object(candidate: &str) -> Result<Map<String, Value>, SchemaViolation> {
    let body = strip_code_fence(candidate);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(SchemaViolation::NotAStructure(format!(
            "expected an object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(SchemaViolation::NotAStructure(e.to_string())),
    }
}

/// Removes a markdown code fence wrapping the whole text, if any.
///
/// ```text
/// ```json
/// {"content": "..."}
/// ```
/// ```
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    let body = match inner.split_once('\n') {
        Some((info, body)) if !info.trim().contains(char::is_whitespace) => body,
        _ => inner,
    };
    strip_inline_info_string(body.trim())
}

/// Drops a language tag that shares a line with the object, as in
/// ```` ```json {"content": "..."}``` ````.
fn strip_inline_info_string(body: &str) -> &str {
    let tag_end = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    if tag_end == 0 {
        return body;
    }
    let rest = body[tag_end..].trim_start();
    if rest.starts_with('{') {
        rest
    } else {
        body
    }
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, SchemaViolation> {
    match object.get(field) {
        None | Some(Value::Null) => Err(SchemaViolation::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(SchemaViolation::NotAString(field)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
