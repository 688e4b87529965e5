//! Registers the Telegram notifier as a tool with the Letta agent platform.

use anyhow::Result;
use serde::Serialize;

use crate::letta::RegisteredTool;
use crate::tools::notify::tool_definition;
use crate::tools::ToolDefinition;

pub const MISSING_API_KEY_MESSAGE: &str =
    "LETTA_API_KEY environment variable not found. Please set it or pass api_key parameter.";

/// Creates or updates a tool definition on an agent platform.
#[async_trait::async_trait]
pub trait ToolRegistry: Send + Sync {
    async fn upsert_tool(&self, definition: &ToolDefinition) -> Result<RegisteredTool>;
}

/// Outcome of a registration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegistrationResult {
    Success { tool_id: String, tool_name: String },
    Error { message: String },
}

impl RegistrationResult {
    fn error(message: impl Into<String>) -> Self {
        RegistrationResult::Error {
            message: message.into(),
        }
    }

    /// Final line printed once registration has finished.
    pub fn summary(&self) -> String {
        match self {
            RegistrationResult::Success { tool_id, .. } => {
                format!("✅ Registration complete! Tool ID: {}", tool_id)
            }
            RegistrationResult::Error { message } => {
                format!("❌ Registration failed: {}", message)
            }
        }
    }
}

/// Upload the `notify_via_telegram` tool.
///
/// `connect` builds the registry client from the API key and is only called
/// when a key is available. Failures come back as [`RegistrationResult::Error`].
pub async fn register<R, F>(api_key: Option<String>, connect: F) -> RegistrationResult
where
    R: ToolRegistry,
    F: FnOnce(String) -> Result<R>,
{
    let Some(api_key) = api_key else {
        log::warn!("No Letta API key available, skipping registration");
        return RegistrationResult::error(MISSING_API_KEY_MESSAGE);
    };

    let registry = match connect(api_key) {
        Ok(registry) => registry,
        Err(e) => {
            println!("❌ Failed to connect to Letta: {:#}", e);
            return RegistrationResult::error(format!("{:#}", e));
        }
    };
    println!("✅ Connected to Letta Cloud API");

    let definition = tool_definition();
    match registry.upsert_tool(&definition).await {
        Ok(tool) => {
            log::info!("Registered tool {} ({})", tool.name, tool.id);
            print_registered(&tool);
            RegistrationResult::Success {
                tool_id: tool.id,
                tool_name: tool.name,
            }
        }
        Err(e) => {
            log::error!("Tool registration failed: {:#}", e);
            println!("❌ Failed to register tool: {:#}", e);
            RegistrationResult::error(format!("{:#}", e))
        }
    }
}

fn print_registered(tool: &RegisteredTool) {
    println!("✅ Tool registered successfully!");
    println!("{}", tool);
    println!();
    println!("🔧 Next steps:");
    println!("1. Make sure TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID are set where your agents run");
    println!("2. Attach the notify_via_telegram tool to the agents that should notify you");
    println!("3. Agents can then call notify_via_telegram to send proactive messages");
}
