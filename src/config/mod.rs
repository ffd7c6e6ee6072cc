//! Environment-driven configuration.

use std::str::FromStr;

use tracing::warn;

use crate::runtime::{ReasoningEffort, ReasoningSummary};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-5";

/// Backend configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct PlumeConfig {
    /// API key for the hosted runtime.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Vector store backing the hosted `file_search` tool; the tool is
    /// disabled when unset.
    pub vector_store_id: Option<String>,
    /// MCP documentation server; the MCP tool is disabled when unset.
    pub mcp_server_url: Option<String>,
    pub reasoning_effort: ReasoningEffort,
    pub reasoning_summary: ReasoningSummary,
}

impl Default for PlumeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            vector_store_id: None,
            mcp_server_url: None,
            reasoning_effort: ReasoningEffort::default(),
            reasoning_summary: ReasoningSummary::default(),
        }
    }
}

impl PlumeConfig {
    /// Load from environment variables (`.env` is read if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            base_url: non_empty_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty_var("PLUME_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            vector_store_id: non_empty_var("VECTOR_STORE_ID"),
            mcp_server_url: non_empty_var("MCP_SERVER_URL"),
            reasoning_effort: parse_var("PLUME_REASONING_EFFORT"),
            reasoning_summary: parse_var("PLUME_REASONING_SUMMARY"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str) -> T
where
    T: FromStr + Default,
{
    match non_empty_var(name) {
        None => T::default(),
        Some(raw) => T::from_str(&raw).unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "unrecognized value, using default");
            T::default()
        }),
    }
}
