//! Tool catalog forwarded to the hosted runtime.
//!
//! Hosted tools (web search, file search, MCP documentation lookup) are
//! executed by the runtime itself; function tools are custom
//! capabilities declared to the model. This module only renders the
//! vendor-format specs; execution is the runtime's concern.

use serde::{Deserialize, Serialize};

/// A custom function tool declared to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One tool made available to the agent.
#[derive(Debug, Clone)]
pub enum AgentTool {
    WebSearch,
    FileSearch { vector_store_ids: Vec<String> },
    Mcp {
        name: String,
        url: String,
        description: String,
        allowed_tools: Vec<String>,
    },
    Function(ToolDefinition),
}

impl AgentTool {
    /// Render the vendor-format tool spec.
    pub fn to_spec(&self) -> serde_json::Value {
        match self {
            Self::WebSearch => serde_json::json!({"type": "web_search"}),
            Self::FileSearch { vector_store_ids } => serde_json::json!({
                "type": "file_search",
                "vector_store_ids": vector_store_ids,
            }),
            Self::Mcp {
                name,
                url,
                description,
                allowed_tools,
            } => serde_json::json!({
                "type": "mcp",
                "server_label": name,
                "server_url": url,
                "server_description": description,
                "require_approval": "never",
                "allowed_tools": allowed_tools,
            }),
            Self::Function(def) => serde_json::json!({
                "type": "function",
                "name": def.name,
                "description": def.description,
                "parameters": def.parameters,
                "strict": false,
            }),
        }
    }
}

/// Custom content tools declared on every run.
pub fn content_tools() -> Vec<AgentTool> {
    vec![
        AgentTool::Function(ToolDefinition {
            name: "generate_content".to_string(),
            description: "Generate platform-tailored social media content for the requested topic."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "topic": {"type": "string", "description": "What the content is about"},
                    "platform": {"type": "string", "description": "Target platform"},
                    "tone": {"type": "string", "description": "Desired tone of voice"},
                },
                "required": ["topic", "platform"],
            }),
        }),
        AgentTool::Function(ToolDefinition {
            name: "review_content".to_string(),
            description: "Review a draft for clarity, tone, and platform fit, returning concrete edits."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "draft": {"type": "string", "description": "Draft content to review"},
                    "platform": {"type": "string", "description": "Platform the draft targets"},
                },
                "required": ["draft"],
            }),
        }),
        AgentTool::Function(ToolDefinition {
            name: "generate_image".to_string(),
            description: "Create an illustrative image prompt to accompany a post.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "description": {"type": "string", "description": "What the image should show"},
                    "style": {"type": "string", "description": "Visual style"},
                },
                "required": ["description"],
            }),
        }),
    ]
}
