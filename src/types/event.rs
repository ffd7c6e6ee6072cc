//! Typed output events produced by the stream translator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Lifecycle status of a tool invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolStatus {
    Started,
    Completed,
    Error,
}

/// A tool lifecycle event surfaced to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolEvent {
    /// Resolved tool name (e.g. `generate_content`, `web_search`).
    pub tool: String,
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ToolEvent {
    fn new(tool: impl Into<String>, status: ToolStatus) -> Self {
        Self {
            tool: tool.into(),
            status,
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// A `started` event for the given tool.
    pub fn started(tool: impl Into<String>) -> Self {
        Self::new(tool, ToolStatus::Started)
    }

    /// A `completed` event for the given tool.
    pub fn completed(tool: impl Into<String>) -> Self {
        Self::new(tool, ToolStatus::Completed)
    }

    /// An `error` event with additional context.
    pub fn error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(tool, ToolStatus::Error)
        }
    }
}

/// One event in the translated output sequence.
///
/// Events are emitted in the exact order their triggering inputs were
/// observed; a `ReasoningReplace` always carries the *full* accumulated
/// reasoning text, never a bare delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputEvent {
    Tool(ToolEvent),
    ReasoningReplace { text: String },
    Text { text: String },
    Error { message: String },
}
