use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

use super::{Tool, ToolDefinition};
use crate::config::{Credentials, CredentialsError};
use crate::telegram::{TelegramNotifier, Transport};

pub const TOOL_NAME: &str = "notify_via_telegram";
pub const TOOL_DESCRIPTION: &str = "Send a notification message to the Telegram user.";
pub const TOOL_TAGS: [&str; 3] = ["telegram", "notification", "messaging"];

/// Source the agent platform runs when an agent calls the tool.
const TOOL_SOURCE: &str = include_str!("notify_via_telegram.py");

/// Arguments an agent passes to `notify_via_telegram`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NotifyArgs {
    pub message: String,
}

/// JSON schema for [`NotifyArgs`]: one required string field.
pub fn args_json_schema() -> serde_json::Value {
    json!({
        "title": "NotifyViaTelegramArgs",
        "description": "Schema for the notify_via_telegram tool arguments.",
        "type": "object",
        "properties": {
            "message": {
                "title": "Message",
                "description": "The notification message to send to the Telegram user",
                "type": "string"
            }
        },
        "required": ["message"]
    })
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        source_code: TOOL_SOURCE.to_string(),
        source_type: "python".to_string(),
        description: TOOL_DESCRIPTION.to_string(),
        tags: TOOL_TAGS.iter().map(|t| t.to_string()).collect(),
        args_json_schema: args_json_schema(),
    }
}

/// The Telegram notifier exposed as an agent tool.
///
/// Always answers with a status string; failures are described, not raised.
pub struct NotifyTool<T> {
    notifier: TelegramNotifier<T>,
    credentials: Result<Credentials, CredentialsError>,
}

impl<T: Transport> NotifyTool<T> {
    pub fn new(
        notifier: TelegramNotifier<T>,
        credentials: Result<Credentials, CredentialsError>,
    ) -> Self {
        Self {
            notifier,
            credentials,
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> Tool for NotifyTool<T> {
    type Input = NotifyArgs;
    type Output = String;

    fn name(&self) -> &str {
        TOOL_NAME
    }

    async fn run(&self, args: NotifyArgs) -> Result<String> {
        log::info!("{}: sending notification ({} chars)", self.name(), args.message.len());

        let outcome = self.notifier.notify(&self.credentials, &args.message).await;
        Ok(outcome.to_string())
    }
}
