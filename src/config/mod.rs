//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `LYRA` prefix and
//! nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lyra::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History file: {}", config.storage.history_file.display());
//! ```

mod ai;
mod chat;
mod error;
mod runtime;
mod speech;
mod storage;

pub use ai::AiConfig;
pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use runtime::{Environment, LogFormat, RuntimeConfig};
pub use speech::SpeechConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults; only `LYRA__AI__API_KEY` is required to pass
/// validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Chat model endpoint
    #[serde(default)]
    pub ai: AiConfig,

    /// Optional speech endpoint
    #[serde(default)]
    pub speech: SpeechConfig,

    /// History and audio locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat turn settings
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LYRA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `LYRA__AI__API_KEY=sk-...` -> `ai.api_key = sk-...`
    /// - `LYRA__SPEECH__ENABLED=true` -> `speech.enabled = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("LYRA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.ai.validate()?;
        self.speech.validate()?;
        self.storage.validate()?;
        self.chat.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
