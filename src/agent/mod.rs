//! Agent assembly: query construction, tool wiring, and the top-level
//! streaming entry point.

pub mod prompts;
pub mod tools;

use futures::stream::BoxStream;
use tracing::{info, warn};

use crate::config::PlumeConfig;
use crate::error::Result;
use crate::runtime::{AgentRuntime, RunRequest, SessionOptions};
use crate::stream::StreamTranslator;
use crate::types::ChatMessage;
use crate::wire;

pub use tools::{content_tools, AgentTool, ToolDefinition};

/// How many trailing history messages are replayed into the query.
const HISTORY_WINDOW: usize = 6;

/// Parameters for one content-generation run.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    /// The user's topic or instruction.
    pub message: String,
    /// Target platforms (e.g. `linkedin`, `x`).
    pub platforms: Vec<String>,
    pub content_type: String,
    pub language: String,
    /// Prior conversation, oldest first.
    pub history: Vec<ChatMessage>,
    /// Per-run override of the configured reasoning options.
    pub options: Option<SessionOptions>,
    /// Generate two labeled variants for A/B comparison.
    pub ab_mode: bool,
}

impl ContentRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            platforms: Vec::new(),
            content_type: "post".to_string(),
            language: "English".to_string(),
            history: Vec::new(),
            options: None,
            ab_mode: false,
        }
    }

    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn ab_mode(mut self, ab_mode: bool) -> Self {
        self.ab_mode = ab_mode;
        self
    }
}

/// Build the full query string for the agent: a trailing window of the
/// conversation, then the current request.
pub fn build_query(request: &ContentRequest) -> String {
    let mut parts = Vec::new();

    if !request.history.is_empty() {
        let tail = request
            .history
            .iter()
            .rev()
            .take(HISTORY_WINDOW)
            .rev()
            .map(|msg| format!("{}: {}", msg.role, msg.content))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!("Previous conversation:\n{tail}\n"));
    }

    parts.push(format!(
        "Create social media content for the following:\n\
         - Topic: {}\n\
         - Platforms: {}\n\
         - Content type: {}\n\
         - Language: {}\n",
        request.message,
        request.platforms.join(", "),
        request.content_type,
        request.language,
    ));

    parts.join("\n")
}

/// Assemble the tool list for a run from the configuration.
///
/// Web search and the custom content tools are always available; file
/// search and MCP documentation lookup join only when configured.
pub fn build_tools(config: &PlumeConfig) -> Vec<AgentTool> {
    let mut agent_tools = vec![AgentTool::WebSearch];
    agent_tools.extend(content_tools());

    match &config.vector_store_id {
        Some(vector_store_id) => {
            agent_tools.push(AgentTool::FileSearch {
                vector_store_ids: vec![vector_store_id.clone()],
            });
            info!(vector_store_id = %vector_store_id, "file_search tool enabled");
        }
        None => {
            warn!("VECTOR_STORE_ID not set — file_search tool disabled");
        }
    }

    match &config.mcp_server_url {
        Some(url) => {
            agent_tools.push(AgentTool::Mcp {
                name: "docs_search".to_string(),
                url: url.clone(),
                description: "Search and retrieve official product documentation, \
                              code samples, and technical guides."
                    .to_string(),
                allowed_tools: vec![
                    "docs_search".to_string(),
                    "docs_fetch".to_string(),
                    "code_sample_search".to_string(),
                ],
            });
            info!(url = %url, "MCP tool enabled");
        }
        None => {
            info!("MCP_SERVER_URL not configured — MCP tool disabled");
        }
    }

    agent_tools
}

/// Execute the agent and stream wire-encoded chunks.
///
/// Reasoning snapshots, tool lifecycle markers, and plain text arrive in
/// the order the runtime produced them; an upstream failure surfaces as
/// one error frame followed by the error itself.
pub async fn stream_content(
    runtime: &dyn AgentRuntime,
    config: &PlumeConfig,
    request: ContentRequest,
) -> Result<BoxStream<'static, Result<String>>> {
    let options = request.options.unwrap_or(SessionOptions {
        reasoning_effort: config.reasoning_effort,
        reasoning_summary: config.reasoning_summary,
    });

    let mut run = RunRequest::new(prompts::system_prompt(request.ab_mode), build_query(&request));
    run.tools = build_tools(config).iter().map(AgentTool::to_spec).collect();
    run.options = options;

    info!(
        run_id = %run.id,
        message = %truncate(&request.message, 80),
        platforms = ?request.platforms,
        "agent processing"
    );

    let updates = runtime.run(run).await?;
    Ok(wire::into_wire(StreamTranslator::new().translate(updates)))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect::<String>() + "..."
    }
}
