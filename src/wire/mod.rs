//! Wire event codec.
//!
//! Serializes typed [`OutputEvent`]s into the tagged marker format the
//! frontend splits on, and recognizes marker boundaries when parsing.
//! Markers are double-underscore sentinel tokens chosen to never collide
//! with plausible model-generated text, so a line-oriented consumer can
//! split the stream without a full parser. Marker sequences inside JSON
//! payload values receive no escaping beyond standard JSON string
//! escaping.

use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;

use crate::error::PlumeError;
use crate::types::{OutputEvent, ToolEvent, ToolStatus};

pub const TOOL_EVENT_START: &str = "__TOOL_EVENT__";
pub const TOOL_EVENT_END: &str = "__END_TOOL_EVENT__";
pub const REASONING_START: &str = "__REASONING_REPLACE__";
pub const REASONING_END: &str = "__END_REASONING_REPLACE__";

/// Encode a tool lifecycle event as a marker-bracketed JSON payload.
pub fn encode_tool_event(event: &ToolEvent) -> String {
    let mut payload = serde_json::json!({
        "type": "tool_event",
        "tool": event.tool,
        "status": event.status,
        "timestamp": event.timestamp.to_rfc3339(),
    });
    if let Some(message) = &event.message {
        payload["message"] = serde_json::json!(message);
    }
    format!("{TOOL_EVENT_START}{payload}{TOOL_EVENT_END}")
}

/// Encode a full reasoning snapshot for total replacement downstream.
pub fn encode_reasoning(text: &str) -> String {
    format!("{REASONING_START}{text}{REASONING_END}")
}

/// Encode a stream-level error as a generic SSE data frame.
///
/// Deliberately not the tool-event marker format: an error terminates the
/// stream and is parsed by the transport layer, not the marker splitter.
pub fn encode_error(message: &str) -> String {
    let payload = serde_json::json!({
        "type": "error",
        "message": message,
    });
    format!("data: {payload}\n\n")
}

/// Encode any output event into its wire form. Plain text passes through
/// unwrapped.
pub fn encode(event: &OutputEvent) -> String {
    match event {
        OutputEvent::Tool(tool_event) => encode_tool_event(tool_event),
        OutputEvent::ReasoningReplace { text } => encode_reasoning(text),
        OutputEvent::Text { text } => text.clone(),
        OutputEvent::Error { message } => encode_error(message),
    }
}

#[derive(Deserialize)]
struct ToolEventPayload {
    tool: String,
    status: ToolStatus,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    message: Option<String>,
}

/// Recognize and parse a tool-event chunk. Returns `None` unless the
/// chunk is exactly one marker-bracketed tool event.
pub fn parse_tool_event(chunk: &str) -> Option<ToolEvent> {
    let payload = chunk
        .strip_prefix(TOOL_EVENT_START)?
        .strip_suffix(TOOL_EVENT_END)?;
    let payload: ToolEventPayload = serde_json::from_str(payload).ok()?;
    Some(ToolEvent {
        tool: payload.tool,
        status: payload.status,
        message: payload.message,
        timestamp: payload.timestamp,
    })
}

/// Recognize a reasoning-replace chunk and return its full text.
pub fn parse_reasoning(chunk: &str) -> Option<&str> {
    chunk
        .strip_prefix(REASONING_START)?
        .strip_suffix(REASONING_END)
}

/// Adapt a translated event stream into wire chunks.
///
/// Errors pass through untouched; the translator has already emitted the
/// matching error event before failing the stream.
pub fn into_wire(
    events: BoxStream<'static, Result<OutputEvent, PlumeError>>,
) -> BoxStream<'static, Result<String, PlumeError>> {
    events.map(|item| item.map(|event| encode(&event))).boxed()
}
