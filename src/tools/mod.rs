pub mod notify;

pub use notify::{NotifyArgs, NotifyTool};

use anyhow::Result;
use serde::Serialize;

/// Tool trait for operations exposed to an agent runtime.
///
/// Not object-safe (associated types). Callers hold tools by concrete type.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn name(&self) -> &str;
    async fn run(&self, input: Self::Input) -> Result<Self::Output>;
}

/// What an agent platform needs to host a tool: the source it executes,
/// a JSON schema for the arguments and tags for discovery.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDefinition {
    pub source_code: String,
    pub source_type: String,
    pub description: String,
    pub tags: Vec<String>,
    pub args_json_schema: serde_json::Value,
}
