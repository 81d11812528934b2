//! Exposes `run_all` to a host agent as a schema-described tool.

use crate::error::BridgeError;
use crate::output::render_markdown;
use crate::review::ReviewOrchestrator;
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const TOOL_NAME: &str = "run_parallel_code_reviews";

const TOOL_DESCRIPTION: &str = "Review code from several aspects at once (for example security, \
performance, maintainability). Each aspect runs in its own isolated worker process and the \
results are merged into one report.";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReviewToolInput {
    /// Code to review
    pub code: String,

    /// Review aspects in report order. Defaults to security, performance, maintainability.
    #[serde(default)]
    #[schemars(default = "default_tool_aspects")]
    pub aspects: Option<Vec<String>>,
}

fn default_tool_aspects() -> Option<Vec<String>> {
    Some(crate::config::default_aspects())
}

#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: RootSchema,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME,
        description: TOOL_DESCRIPTION,
        input_schema: schema_for!(ReviewToolInput),
    }
}

/// A tool invocation as sent by the host agent
#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub input: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ContentBlock::Text { text }],
            is_error,
        }
    }
}

pub struct ToolBridge {
    orchestrator: ReviewOrchestrator,
    default_aspects: Vec<String>,
}

impl ToolBridge {
    pub fn new(orchestrator: ReviewOrchestrator, default_aspects: Vec<String>) -> Self {
        Self {
            orchestrator,
            default_aspects,
        }
    }

    /// Run a tool call, propagating bridge errors
    pub async fn call(&self, call: ToolCall) -> Result<ToolResult, BridgeError> {
        if call.name != TOOL_NAME {
            return Err(BridgeError::UnknownTool(call.name));
        }

        let input: ReviewToolInput = serde_json::from_value(call.input)?;
        let aspects = input
            .aspects
            .unwrap_or_else(|| self.default_aspects.clone());

        info!("Tool call: {} aspects", aspects.len());
        let report = self.orchestrator.run_all(&input.code, &aspects).await?;

        Ok(ToolResult::text(render_markdown(&report.outcomes), false))
    }

    /// Run a tool call; any bridge error comes back as an error result
    pub async fn handle(&self, call: ToolCall) -> ToolResult {
        match self.call(call).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool call failed: {}", e);
                ToolResult::text(format!("❌ Parallel review failed: {}", e), true)
            }
        }
    }
}
