use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub const LETTA_API_KEY_VAR: &str = "LETTA_API_KEY";

/// Non-secret settings, optionally read from a TOML file.
///
/// Secrets (bot token, chat id, Letta key) only ever come from the environment.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub letta: LettaConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LettaConfig {
    pub base_url: String,
}

impl Default for LettaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.letta.com".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    /// Parse and validate TOML configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        if config.telegram.timeout_secs == 0 {
            anyhow::bail!("telegram.timeout_secs must be greater than 0");
        }

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config = Self::from_file(path)?;
        log::debug!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}

/// A required Telegram setting is absent or empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("TELEGRAM_BOT_TOKEN environment variable is not set")]
    MissingBotToken,
    #[error("TELEGRAM_CHAT_ID environment variable is not set")]
    MissingChatId,
}

/// Bot token and destination chat, resolved once at the process boundary.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve credentials through `lookup`. The token is checked before the chat id.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = non_empty(lookup(BOT_TOKEN_VAR)).ok_or(CredentialsError::MissingBotToken)?;
        let chat_id = non_empty(lookup(CHAT_ID_VAR)).ok_or(CredentialsError::MissingChatId)?;

        Ok(Self::new(bot_token, chat_id))
    }
}

/// Pick the Letta API key: an explicit value wins over `LETTA_API_KEY`.
pub fn resolve_letta_api_key<F>(explicit: Option<String>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(explicit).or_else(|| non_empty(lookup(LETTA_API_KEY_VAR)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
