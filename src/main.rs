//! Lyra binary - composition root.
//!
//! 1. Load and validate configuration from `LYRA__*` environment variables
//! 2. Initialize tracing on stderr
//! 3. Wire the chat model, speech backend, history log and audio store
//! 4. Read turns from stdin and write one JSON object per reply to stdout
//!
//! Input lines:
//! - plain text is sent as a typed user message
//! - `:voice <path>` transcribes a recording and sends the transcript
//! - `:history` prints the persisted conversation
//! - `:quit` exits

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use lyra::adapters::{
    JsonlConversationLog, LocalAudioStore, OpenAIProvider, OpenAISpeech, SpeechBackend,
};
use lyra::application::{
    GenerationConfig, GetHistoryHandler, ModalityResolver, ReplyGenerator,
    SendChatMessageCommand, SendChatMessageHandler, TranscribeSpeechCommand,
    TranscribeSpeechHandler,
};
use lyra::config::{AppConfig, LogFormat, RuntimeConfig, ValidationError};
use lyra::domain::conversation::{ContextBuilder, DEFAULT_PERSONA_PROMPT};
use lyra::ports::AudioFormat;

type ChatHandler =
    SendChatMessageHandler<OpenAIProvider, SpeechBackend, LocalAudioStore, JsonlConversationLog>;
type TranscribeHandler = TranscribeSpeechHandler<SpeechBackend, LocalAudioStore, JsonlConversationLog>;

struct App {
    chat: ChatHandler,
    transcribe: TranscribeHandler,
    history: GetHistoryHandler<JsonlConversationLog>,
}

fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(runtime.log_level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match runtime.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn build_app(config: &AppConfig) -> Result<App, Box<dyn std::error::Error>> {
    let provider_config = config
        .ai
        .provider_config()
        .ok_or(ValidationError::MissingRequired("LYRA__AI__API_KEY"))?;
    let provider = Arc::new(OpenAIProvider::new(provider_config)?);

    let speech = Arc::new(match config.speech.adapter_config() {
        Some(speech_config) => SpeechBackend::from(OpenAISpeech::new(speech_config)?),
        None => SpeechBackend::default(),
    });
    let log = Arc::new(JsonlConversationLog::new(&config.storage.history_file));
    let audio_store = Arc::new(LocalAudioStore::new(&config.storage.audio_dir));

    tracing::info!(
        model = %config.ai.model,
        speech_enabled = speech.is_enabled(),
        history = %config.storage.history_file.display(),
        audio_dir = %config.storage.audio_dir.display(),
        "Lyra configured"
    );

    let generator = ReplyGenerator::new(
        provider,
        GenerationConfig {
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
            locale: config.chat.locale,
        },
    );
    let resolver = ModalityResolver::new(speech.clone(), audio_store.clone());
    let chat = SendChatMessageHandler::new(
        ContextBuilder::new(DEFAULT_PERSONA_PROMPT),
        generator,
        resolver,
        log.clone(),
    )
    .with_max_message_chars(config.chat.max_message_chars);

    Ok(App {
        chat,
        transcribe: TranscribeSpeechHandler::new(speech, audio_store, log.clone()),
        history: GetHistoryHandler::new(log),
    })
}

fn emit<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::error!(error = %e, "Failed to encode output"),
    }
}

fn emit_error(message: impl std::fmt::Display) {
    emit(&serde_json::json!({ "error": message.to_string() }));
}

async fn send(app: &App, cmd: SendChatMessageCommand) {
    match app.chat.handle(cmd).await {
        Ok(reply) => emit(&reply),
        Err(e) => emit_error(e),
    }
}

async fn send_voice(app: &App, path: &Path) {
    let format = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(AudioFormat::from_extension)
    {
        Some(format) => format,
        None => return emit_error(format!("unsupported audio file: {}", path.display())),
    };
    let audio = match tokio::fs::read(path).await {
        Ok(audio) => audio,
        Err(e) => return emit_error(format!("cannot read {}: {}", path.display(), e)),
    };

    match app
        .transcribe
        .handle(TranscribeSpeechCommand::new(audio, format))
        .await
    {
        Ok(transcript) => {
            emit(&transcript);
            send(app, SendChatMessageCommand::voice(transcript.text)).await;
        }
        Err(e) => emit_error(e),
    }
}

async fn run(app: App) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            ":quit" | ":exit" => break,
            ":history" => match app.history.handle().await {
                Ok(turns) => emit(&turns),
                Err(e) => emit_error(e),
            },
            _ => match line.strip_prefix(":voice ") {
                Some(path) => send_voice(&app, Path::new(path.trim())).await,
                None => send(&app, SendChatMessageCommand::text(line)).await,
            },
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.runtime);
    config.validate()?;

    tracing::info!("Starting Lyra v{}", env!("CARGO_PKG_VERSION"));

    let app = build_app(&config)?;
    run(app).await
}
