use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;

use crate::registrar::ToolRegistry;
use crate::tools::ToolDefinition;

/// A tool as stored by Letta after an upsert.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RegisteredTool {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl fmt::Display for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   Tool ID: {}", self.id)?;
        writeln!(f, "   Tool Name: {}", self.name)?;
        write!(
            f,
            "   Description: {}",
            self.description.as_deref().unwrap_or("(none)")
        )
    }
}

/// HTTP client for the Letta tools API.
pub struct LettaClient {
    pub base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl LettaClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Create or update a tool, keyed by its function name.
    pub async fn upsert_tool(&self, definition: &ToolDefinition) -> Result<RegisteredTool> {
        let response = self
            .client
            .put(format!("{}/v1/tools/", self.base_url))
            .bearer_auth(&self.api_key)
            .json(definition)
            .send()
            .await
            .context("Failed to send request to Letta")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Letta API error ({}): {}", status, error_text);
        }

        let tool: RegisteredTool = response
            .json()
            .await
            .context("Failed to parse Letta tool response")?;

        Ok(tool)
    }
}

#[async_trait::async_trait]
impl ToolRegistry for LettaClient {
    async fn upsert_tool(&self, definition: &ToolDefinition) -> Result<RegisteredTool> {
        LettaClient::upsert_tool(self, definition).await
    }
}
