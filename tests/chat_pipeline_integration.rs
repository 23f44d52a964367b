//! Integration tests for the chat pipeline.
//!
//! These tests drive full turns through the public handlers:
//! 1. Context is built from the on-disk history log
//! 2. The reply generator validates, repairs, regenerates or falls back
//! 3. The modality resolver synthesizes voice replies into the audio store
//! 4. Both sides of the turn are appended to the history log
//!
//! The chat model and speech backends are mocks; history and audio use the
//! real filesystem adapters in a temporary directory.

use std::sync::Arc;

use tempfile::TempDir;

use lyra::adapters::{
    JsonlConversationLog, LocalAudioStore, MockAIProvider, MockSpeechRecognizer,
    MockSpeechSynthesizer, NoSpeechBackend,
};
use lyra::application::{
    ChatReply, GenerationConfig, GetHistoryHandler, ModalityResolver, ReplyGenerator,
    SendChatMessageCommand, SendChatMessageHandler, TranscribeSpeechCommand,
    TranscribeSpeechError, TranscribeSpeechHandler,
};
use lyra::domain::conversation::{ContextBuilder, ROLE_ASSISTANT, ROLE_USER};
use lyra::domain::foundation::OutputType;
use lyra::domain::reply::{Locale, FALLBACK_EMOTION};
use lyra::ports::{AIError, AudioFormat, ConversationLog, MessageRole, SynthesisError};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Workspace {
    dir: TempDir,
    log: Arc<JsonlConversationLog>,
    audio: Arc<LocalAudioStore>,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let log = Arc::new(JsonlConversationLog::new(dir.path().join("history.jsonl")));
        let audio = Arc::new(LocalAudioStore::new(dir.path().join("audio")));
        Self { dir, log, audio }
    }

    fn reopen_log(&self) -> Arc<JsonlConversationLog> {
        Arc::new(JsonlConversationLog::new(self.dir.path().join("history.jsonl")))
    }

    fn audio_file(&self, url: &str) -> std::path::PathBuf {
        let name = url.rsplit('/').next().unwrap();
        self.dir.path().join("audio").join(name)
    }

    fn chat<S>(
        &self,
        provider: Arc<MockAIProvider>,
        synthesizer: Arc<S>,
        locale: Locale,
    ) -> SendChatMessageHandler<MockAIProvider, S, LocalAudioStore, JsonlConversationLog>
    where
        S: lyra::ports::SpeechSynthesizer + 'static,
    {
        SendChatMessageHandler::new(
            ContextBuilder::new("You are Lyra."),
            ReplyGenerator::new(
                provider,
                GenerationConfig {
                    locale,
                    ..GenerationConfig::default()
                },
            ),
            ModalityResolver::new(synthesizer, Arc::clone(&self.audio)),
            Arc::clone(&self.log),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn voice_reply_is_synthesized_stored_and_logged() {
    // Given: the model asks for a voice reply and synthesis works
    let ws = Workspace::new();
    let provider = Arc::new(MockAIProvider::new().with_response(
        r#"{"content":"晚安，好梦","emotion":"温柔","output_type":"voice"}"#,
    ));
    let synth = Arc::new(MockSpeechSynthesizer::succeeding(b"RIFF0000WAVE".to_vec()));
    let chat = ws.chat(Arc::clone(&provider), Arc::clone(&synth), Locale::En);

    // When
    let reply = chat
        .handle(SendChatMessageCommand::text("我要睡了"))
        .await
        .unwrap();

    // Then: the reply carries an audio URL whose file exists on disk
    assert_eq!(reply.output_type, OutputType::Voice);
    assert_eq!(reply.emotion, "温柔");
    let url = reply.audio_url.clone().unwrap();
    assert!(url.starts_with("/audio/reply_"), "unexpected url {}", url);
    assert!(url.ends_with(".wav"));
    assert_eq!(
        tokio::fs::read(ws.audio_file(&url)).await.unwrap(),
        b"RIFF0000WAVE".to_vec()
    );
    assert_eq!(synth.get_calls(), vec!["晚安，好梦".to_string()]);

    // And: both turns are persisted, the assistant record with its audio
    let turns = ws.log.read_all().await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, ROLE_USER);
    assert_eq!(turns[0].content, "我要睡了");
    assert_eq!(turns[1].role, ROLE_ASSISTANT);
    assert_eq!(turns[1].audio_url.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn synthesis_failure_degrades_voice_to_text() {
    // Given: synthesis backend is down
    let ws = Workspace::new();
    let provider = Arc::new(MockAIProvider::new().with_response(
        r#"{"content":"Sure!","emotion":"cheerful","output_type":"voice"}"#,
    ));
    let synth = Arc::new(MockSpeechSynthesizer::failing(SynthesisError::backend(
        503, "busy",
    )));
    let chat = ws.chat(provider, synth, Locale::En);

    // When
    let reply = chat.handle(SendChatMessageCommand::text("sing")).await.unwrap();

    // Then: same words, delivered as text without audio
    assert_eq!(
        reply,
        ChatReply {
            message: "Sure!".to_string(),
            emotion: "cheerful".to_string(),
            output_type: OutputType::Text,
            audio_url: None,
        }
    );
    let turns = ws.log.read_all().await.unwrap();
    assert_eq!(turns[1].output_type, OutputType::Text);
    assert!(turns[1].audio_url.is_none());
}

#[tokio::test]
async fn disabled_speech_answers_voice_requests_in_text() {
    let ws = Workspace::new();
    let provider = Arc::new(MockAIProvider::new().with_response(
        r#"{"content":"hi","emotion":"calm","output_type":"voice"}"#,
    ));
    let chat = ws.chat(provider, Arc::new(NoSpeechBackend), Locale::En);

    let reply = chat.handle(SendChatMessageCommand::text("hello")).await.unwrap();

    assert_eq!(reply.output_type, OutputType::Text);
    assert!(reply.audio_url.is_none());
}

#[tokio::test]
async fn unreachable_model_yields_logged_fallback() {
    // Given: the chat model is unreachable
    let ws = Workspace::new();
    let provider = Arc::new(MockAIProvider::new().with_error(AIError::network("connection refused")));
    let chat = ws.chat(Arc::clone(&provider), Arc::new(NoSpeechBackend), Locale::Zh);

    // When
    let reply = chat.handle(SendChatMessageCommand::text("在吗")).await.unwrap();

    // Then: one attempt, localized apology, persisted like any reply
    assert_eq!(provider.call_count(), 1);
    assert_eq!(reply.message, Locale::Zh.apology());
    assert_eq!(reply.emotion, FALLBACK_EMOTION);
    assert_eq!(reply.output_type, OutputType::Text);

    let turns = ws.log.read_all().await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content, Locale::Zh.apology());
}

#[tokio::test]
async fn prose_reply_is_repaired_without_second_call() {
    let ws = Workspace::new();
    let provider = Arc::new(MockAIProvider::new().with_response("Of course, happy to help."));
    let chat = ws.chat(Arc::clone(&provider), Arc::new(NoSpeechBackend), Locale::En);

    let reply = chat.handle(SendChatMessageCommand::text("help?")).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(reply.message, "Of course, happy to help.");
    assert_eq!(reply.output_type, OutputType::Text);
}

#[tokio::test]
async fn unrecoverable_output_regenerates_once() {
    // Given: first output has no content, second is valid
    let ws = Workspace::new();
    let provider = Arc::new(
        MockAIProvider::new()
            .with_response(r#"{"emotion":"calm","output_type":"text"}"#)
            .with_response(r#"{"content":"Second try","emotion":"calm","output_type":"text"}"#),
    );
    let chat = ws.chat(Arc::clone(&provider), Arc::new(NoSpeechBackend), Locale::En);

    let reply = chat.handle(SendChatMessageCommand::text("hi")).await.unwrap();

    assert_eq!(provider.call_count(), 2);
    assert_eq!(reply.message, "Second try");
}

#[tokio::test]
async fn history_survives_restart_and_feeds_context() {
    // Given: one turn recorded by a first process
    let ws = Workspace::new();
    let first = ws.chat(
        Arc::new(MockAIProvider::new().with_response(
            r#"{"content":"Nice to meet you, Ada","emotion":"warm","output_type":"text"}"#,
        )),
        Arc::new(NoSpeechBackend),
        Locale::En,
    );
    first
        .handle(SendChatMessageCommand::text("My name is Ada"))
        .await
        .unwrap();

    // When: a new process opens the same history file
    let provider = Arc::new(MockAIProvider::new().with_response(
        r#"{"content":"You are Ada","emotion":"warm","output_type":"text"}"#,
    ));
    let second = SendChatMessageHandler::new(
        ContextBuilder::new("You are Lyra."),
        ReplyGenerator::new(Arc::clone(&provider), GenerationConfig::default()),
        ModalityResolver::new(Arc::new(NoSpeechBackend), Arc::clone(&ws.audio)),
        ws.reopen_log(),
    );
    second
        .handle(SendChatMessageCommand::text("Who am I?"))
        .await
        .unwrap();

    // Then: the model saw preamble, both earlier turns, then the new input
    let calls = provider.get_calls();
    let messages = &calls[0].messages;
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[1].content, "My name is Ada");
    assert_eq!(messages[2].role, MessageRole::Assistant);
    assert_eq!(messages[2].content, "Nice to meet you, Ada");
    assert_eq!(messages[3].content, "Who am I?");

    let history = GetHistoryHandler::new(ws.reopen_log()).handle().await.unwrap();
    assert_eq!(history.len(), 4);
}

#[tokio::test]
async fn transcribed_input_is_logged_once() {
    // Given: a recording that transcribes to a greeting
    let ws = Workspace::new();
    let recognizer = Arc::new(MockSpeechRecognizer::succeeding("  你好  "));
    let transcribe = TranscribeSpeechHandler::new(
        Arc::clone(&recognizer),
        Arc::clone(&ws.audio),
        Arc::clone(&ws.log),
    );
    let provider = Arc::new(MockAIProvider::new().with_response(
        r#"{"content":"你好！","emotion":"开心","output_type":"text"}"#,
    ));
    let chat = ws.chat(Arc::clone(&provider), Arc::new(NoSpeechBackend), Locale::Zh);

    // When: the recording is transcribed and sent as a voice turn
    let transcript = transcribe
        .handle(TranscribeSpeechCommand::new(b"webm-bytes".to_vec(), AudioFormat::Webm))
        .await
        .unwrap();
    assert_eq!(transcript.text, "你好");
    assert!(transcript.file.starts_with("input_"));
    chat.handle(SendChatMessageCommand::voice(transcript.text.clone()))
        .await
        .unwrap();

    // Then: one user record (with the recording) and one assistant record
    let turns = ws.log.read_all().await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].content, "你好");
    assert_eq!(turns[0].output_type, OutputType::Voice);
    assert!(turns[0].audio_url.is_some());
    assert_eq!(turns[1].role, ROLE_ASSISTANT);

    // And: the model saw the input exactly once
    let messages = &provider.get_calls()[0].messages;
    let mentions = messages.iter().filter(|m| m.content == "你好").count();
    assert_eq!(mentions, 1);
}

#[tokio::test]
async fn empty_transcript_is_rejected_and_not_logged() {
    let ws = Workspace::new();
    let transcribe = TranscribeSpeechHandler::new(
        Arc::new(MockSpeechRecognizer::succeeding("   ")),
        Arc::clone(&ws.audio),
        Arc::clone(&ws.log),
    );

    let result = transcribe
        .handle(TranscribeSpeechCommand::new(b"silence".to_vec(), AudioFormat::Wav))
        .await;

    assert!(matches!(result, Err(TranscribeSpeechError::EmptyTranscript)));
    assert!(ws.log.read_all().await.unwrap().is_empty());
}
