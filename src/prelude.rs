//! Convenience re-exports for common use.

pub use crate::agent::{build_query, build_tools, stream_content, AgentTool, ContentRequest};
pub use crate::config::PlumeConfig;
pub use crate::error::{PlumeError, Result};
pub use crate::runtime::responses::ResponsesClient;
pub use crate::runtime::{
    AgentRuntime, ReasoningEffort, ReasoningSummary, RunRequest, SessionOptions,
};
pub use crate::store::{Conversation, ConversationStore, ConversationSummary};
pub use crate::stream::{ReasoningAccumulator, StreamTranslator, ToolTracker};
pub use crate::types::{
    AgentUpdate, ChatMessage, ContentItem, OutputEvent, RawEnvelope, Role, ToolEvent, ToolStatus,
};
pub use crate::wire::{encode, into_wire, parse_reasoning, parse_tool_event};
