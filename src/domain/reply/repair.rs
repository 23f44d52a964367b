//! Reply repair.
//!
//! Best-effort, single-pass normalization of model output that failed schema
//! validation. Repair keeps the model's own words: prose is wrapped as-is and
//! partial objects get defaults only for the fields that are absent or
//! invalid. It never calls the model and never retries.

use serde_json::{Map, Value};
use thiserror::Error;

use super::schema::{
    parse_object, strip_code_fence, SchemaViolation, StructuredReply, FIELD_CONTENT,
    FIELD_EMOTION, FIELD_OUTPUT_TYPE,
};
use crate::domain::foundation::{OutputType, DEFAULT_EMOTION};

/// Model output that cannot be turned into a valid reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnrecoverableOutput {
    /// The output is empty or whitespace only.
    #[error("model output is empty")]
    Empty,

    /// The output opens like a JSON object but does not parse.
    #[error("model output is a malformed structure: {0}")]
    MalformedStructure(String),

    /// The repaired object still breaks the schema.
    #[error("repaired reply still violates the schema: {0}")]
    StillInvalid(#[from] SchemaViolation),
}

/// Repairs raw model output into a structured reply.
///
/// - prose → `{content: raw_text, emotion: "neutral", output_type: "text"}`
/// - object with missing or invalid `emotion` / `output_type` → defaults filled,
///   valid fields preserved
/// - object without usable `content`, blank output, or a broken object →
///   `UnrecoverableOutput`
pub fn repair(raw_text: &str) -> Result<StructuredReply, UnrecoverableOutput> {
    if raw_text.trim().is_empty() {
        return Err(UnrecoverableOutput::Empty);
    }

    match parse_object(raw_text) {
        Ok(object) => repair_object(&object),
        Err(violation) if looks_structured(raw_text) => {
            Err(UnrecoverableOutput::MalformedStructure(violation.to_string()))
        }
        Err(_) => Ok(wrap_prose(raw_text)?),
    }
}

fn repair_object(object: &Map<String, Value>) -> Result<StructuredReply, UnrecoverableOutput> {
    let content = match object.get(FIELD_CONTENT) {
        Some(Value::String(s)) => s.as_str(),
        Some(Value::Null) | None => return Err(SchemaViolation::MissingField(FIELD_CONTENT).into()),
        Some(_) => return Err(SchemaViolation::NotAString(FIELD_CONTENT).into()),
    };

    let emotion = match object.get(FIELD_EMOTION) {
        Some(Value::String(s)) => s.as_str(),
        _ => DEFAULT_EMOTION,
    };

    let output_type = object
        .get(FIELD_OUTPUT_TYPE)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<OutputType>().ok())
        .unwrap_or_default();

    Ok(StructuredReply::new(content, emotion, output_type)?)
}

fn wrap_prose(raw_text: &str) -> Result<StructuredReply, SchemaViolation> {
    StructuredReply::new(raw_text, DEFAULT_EMOTION, OutputType::Text)
}

/// True when the text opens an object, so wrapping it as prose would show raw
/// braces to the user.
fn looks_structured(raw_text: &str) -> bool {
    strip_code_fence(raw_text).trim_start().starts_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_ok_is_wrapped() {
        let reply = repair("OK").unwrap();

        assert_eq!(reply.content(), "OK");
        assert_eq!(reply.emotion(), "neutral");
        assert_eq!(reply.output_type(), OutputType::Text);
    }

    #[test]
    fn prose_keeps_exact_text() {
        let raw = "  好的，我明白了。\n还有什么需要吗？ ";
        assert_eq!(repair(raw).unwrap().content(), raw);
    }

    #[test]
    fn non_object_json_is_treated_as_prose() {
        assert_eq!(repair("42").unwrap().content(), "42");
        assert_eq!(repair("\"quoted\"").unwrap().content(), "\"quoted\"");
        assert_eq!(repair("[1, 2]").unwrap().content(), "[1, 2]");
    }

    #[test]
    fn missing_emotion_and_output_type_get_defaults() {
        let reply = repair(r#"{"content":"嗨"}"#).unwrap();

        assert_eq!(reply.content(), "嗨");
        assert_eq!(reply.emotion(), "neutral");
        assert_eq!(reply.output_type(), OutputType::Text);
    }

    #[test]
    fn present_valid_fields_are_preserved() {
        let reply = repair(r#"{"content":"听我唱","output_type":"voice"}"#).unwrap();
        assert_eq!(reply.output_type(), OutputType::Voice);
        assert_eq!(reply.emotion(), "neutral");

        let reply = repair(r#"{"content":"hi","emotion":"shy"}"#).unwrap();
        assert_eq!(reply.emotion(), "shy");
    }

    #[test]
    fn invalid_output_type_falls_back_to_text() {
        let reply = repair(r#"{"content":"hi","emotion":"calm","output_type":"audio"}"#).unwrap();
        assert_eq!(reply.output_type(), OutputType::Text);
        assert_eq!(reply.emotion(), "calm");
    }

    #[test]
    fn fenced_partial_object_is_repaired() {
        let reply = repair("```json\n{\"content\":\"hi\"}\n```").unwrap();
        assert_eq!(reply.content(), "hi");
    }

    #[test]
    fn single_line_fenced_object_keeps_model_fields() {
        let reply = repair("```json {\"content\":\"hi\",\"emotion\":\"calm\",\"output_type\":\"voice\"}```").unwrap();

        assert_eq!(reply.content(), "hi");
        assert_eq!(reply.emotion(), "calm");
        assert_eq!(reply.output_type(), OutputType::Voice);
    }

    #[test]
    fn single_line_fenced_broken_object_is_unrecoverable() {
        assert!(matches!(
            repair("```json {\"content\": \"hi\"```"),
            Err(UnrecoverableOutput::MalformedStructure(_))
        ));
    }

    #[test]
    fn object_without_content_is_unrecoverable() {
        assert_eq!(
            repair(r#"{"emotion":"calm","output_type":"text"}"#),
            Err(UnrecoverableOutput::StillInvalid(SchemaViolation::MissingField("content")))
        );
    }

    #[test]
    fn object_with_blank_content_is_unrecoverable() {
        assert_eq!(
            repair(r#"{"content":"   "}"#),
            Err(UnrecoverableOutput::StillInvalid(SchemaViolation::EmptyContent))
        );
    }

    #[test]
    fn object_with_non_string_content_is_unrecoverable() {
        assert!(matches!(
            repair(r#"{"content":{"text":"hi"}}"#),
            Err(UnrecoverableOutput::StillInvalid(SchemaViolation::NotAString("content")))
        ));
    }

    #[test]
    fn truncated_object_is_unrecoverable() {
        assert!(matches!(
            repair(r#"{"content": "半截"#),
            Err(UnrecoverableOutput::MalformedStructure(_))
        ));
    }

    #[test]
    fn blank_output_is_unrecoverable() {
        assert_eq!(repair(""), Err(UnrecoverableOutput::Empty));
        assert_eq!(repair(" \n\t"), Err(UnrecoverableOutput::Empty));
    }

    proptest! {
        #[test]
        fn any_prose_is_wrapped_verbatim(raw in "[a-zA-Z一-龥][a-zA-Z0-9 ,.!?一-龥]{0,60}") {
            let reply = repair(&raw).unwrap();

            prop_assert_eq!(reply.content(), raw.as_str());
            prop_assert_eq!(reply.emotion(), "neutral");
            prop_assert_eq!(reply.output_type(), OutputType::Text);
        }
    }
}
