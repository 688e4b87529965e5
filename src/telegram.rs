use serde_json::json;
use std::error::Error as _;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Credentials, CredentialsError, TelegramConfig};
use crate::markdown::escape_markdown_v2;

/// Body of a Bot API `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessagePayload {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: &'static str,
}

impl SendMessagePayload {
    pub fn markdown_v2(chat_id: &str, message: &str) -> Self {
        Self {
            chat_id: chat_id.to_string(),
            text: escape_markdown_v2(message),
            parse_mode: "MarkdownV2",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "chat_id": self.chat_id,
            "text": self.text,
            "parse_mode": self.parse_mode
        })
    }
}

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// The request never produced an HTTP response (connect, DNS, timeout).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the bot token
        let err = err.without_url();
        let mut text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        TransportError(text)
    }
}

/// Sends a JSON POST and reports what came back.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpReply, TransportError>;
}

/// `Transport` backed by a shared reqwest client.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpReply { status, body })
    }
}

/// What happened to a notification. `Display` gives the status string
/// handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Misconfigured(CredentialsError),
    Rejected { status: u16, body: String },
    Failed(TransportError),
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOutcome::Sent => write!(f, "Message sent successfully via Telegram"),
            SendOutcome::Misconfigured(err) => write!(f, "Error: {}", err),
            SendOutcome::Rejected { status, body } => {
                write!(f, "Failed to send Telegram message: {} - {}", status, body)
            }
            SendOutcome::Failed(err) => write!(f, "Error sending Telegram message: {}", err),
        }
    }
}

/// Delivers notifications to a Telegram chat through the Bot API.
pub struct TelegramNotifier<T> {
    transport: T,
    api_base: String,
    timeout: Duration,
}

impl<T: Transport> TelegramNotifier<T> {
    pub fn new(transport: T, config: &TelegramConfig) -> Self {
        Self {
            transport,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, bot_token)
    }

    /// Send `message` if credentials resolved, otherwise report which one is missing.
    pub async fn notify(
        &self,
        credentials: &Result<Credentials, CredentialsError>,
        message: &str,
    ) -> SendOutcome {
        match credentials {
            Ok(credentials) => self.send(credentials, message).await,
            Err(err) => {
                log::warn!("Telegram notification skipped: {}", err);
                SendOutcome::Misconfigured(err.clone())
            }
        }
    }

    /// Escape `message` for MarkdownV2 and post it once. No retries.
    pub async fn send(&self, credentials: &Credentials, message: &str) -> SendOutcome {
        let payload = SendMessagePayload::markdown_v2(&credentials.chat_id, message);
        let body = payload.to_json();

        log::debug!(
            "Sending Telegram message to chat {} ({} chars)",
            credentials.chat_id,
            payload.text.len()
        );

        let url = self.send_message_url(&credentials.bot_token);
        match self.transport.post_json(&url, &body, self.timeout).await {
            Ok(reply) if reply.status == 200 => {
                log::info!("Telegram message delivered to chat {}", credentials.chat_id);
                SendOutcome::Sent
            }
            Ok(reply) => {
                log::warn!("Telegram API rejected message with status {}", reply.status);
                SendOutcome::Rejected {
                    status: reply.status,
                    body: reply.body,
                }
            }
            Err(err) => {
                log::error!("Telegram request failed: {}", err);
                SendOutcome::Failed(err)
            }
        }
    }
}
