//! Raw provider-event normalization.
//!
//! Hosted tool activity (web search, file search, MCP calls) is not
//! folded into structured content items; it only surfaces through the
//! provider's raw events, whose shapes vary across event kinds and SDK
//! versions. All shape-guessing lives in this one seam: a typed match on
//! the documented event forms first, then generic field probing as a
//! last resort. Unrecognized or malformed envelopes are skipped, never
//! fatal.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::types::RawEnvelope;

/// Hosted tool categories recognized from raw event type strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedTool {
    WebSearch,
    FileSearch,
    McpSearch,
}

impl HostedTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebSearch => "web_search",
            Self::FileSearch => "file_search",
            Self::McpSearch => "mcp_search",
        }
    }

    fn from_type(kind: &str) -> Option<Self> {
        if kind.contains("web_search") {
            Some(Self::WebSearch)
        } else if kind.contains("file_search") {
            Some(Self::FileSearch)
        } else if kind.contains("mcp") {
            Some(Self::McpSearch)
        } else {
            None
        }
    }
}

/// Which side of the tool lifecycle a raw event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPhase {
    Started,
    Completed,
}

/// Canonical form of one recognized raw event.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeSignal {
    pub tool: HostedTool,
    pub phase: ToolPhase,
    /// Invocation key: the provider's item id, or the tool-category
    /// placeholder when the event carries none.
    pub key: String,
}

impl EnvelopeSignal {
    fn new(tool: HostedTool, phase: ToolPhase, key: Option<&str>) -> Self {
        let key = key
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| tool.as_str().to_string());
        Self { tool, phase, key }
    }
}

/// Partial typed view of a provider event. All fields defaulted so any
/// object deserializes; unknown shapes simply fail the exact-type match.
#[derive(Debug, Default, Deserialize)]
struct ProviderEvent {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    item: Option<ProviderItem>,
    #[serde(default)]
    item_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    id: Option<String>,
}

/// Normalize a raw envelope into a canonical tool signal, if it is one.
///
/// Ordered attempt: typed variant match on the documented event forms,
/// then generic field extraction. Everything else is ignored.
pub fn normalize_envelope(envelope: &RawEnvelope) -> Option<EnvelopeSignal> {
    let value = &envelope.0;
    match serde_json::from_value::<ProviderEvent>(value.clone()) {
        Ok(event) => {
            if let Some(signal) = classify_event(&event) {
                return Some(signal);
            }
        }
        Err(err) => {
            debug!(error = %err, "raw envelope is not an event object");
        }
    }
    // A plain string payload has no fields to probe.
    if value.is_string() {
        return None;
    }
    classify_value(value)
}

/// Exact match on the typed event shapes the provider documents.
fn classify_event(event: &ProviderEvent) -> Option<EnvelopeSignal> {
    let kind = event.kind.as_str();

    if kind == "response.output_item.added" {
        let item = event.item.as_ref()?;
        let tool = match item.kind.as_str() {
            "web_search_call" => HostedTool::WebSearch,
            "file_search_call" => HostedTool::FileSearch,
            "mcp_call" | "mcp_list_tools" => HostedTool::McpSearch,
            _ => return None,
        };
        return Some(EnvelopeSignal::new(
            tool,
            ToolPhase::Started,
            item.id.as_deref(),
        ));
    }

    if kind.contains("web_search_call") || kind.contains("file_search_call") {
        let tool = if kind.contains("web_search_call") {
            HostedTool::WebSearch
        } else {
            HostedTool::FileSearch
        };
        let phase = if kind.ends_with(".completed") {
            ToolPhase::Completed
        } else if kind.ends_with(".in_progress") || kind.ends_with(".searching") {
            ToolPhase::Started
        } else {
            return None;
        };
        return Some(EnvelopeSignal::new(tool, phase, event.item_id.as_deref()));
    }

    if kind.contains("mcp_call") || kind.contains("mcp_list_tools") {
        let phase = if kind.ends_with(".completed") {
            ToolPhase::Completed
        } else {
            ToolPhase::Started
        };
        return Some(EnvelopeSignal::new(
            HostedTool::McpSearch,
            phase,
            event.item_id.as_deref(),
        ));
    }

    None
}

/// Generic probing for dict-shaped envelopes whose field names drifted
/// from the typed forms.
fn classify_value(value: &Value) -> Option<EnvelopeSignal> {
    let kind = value.get("type").and_then(Value::as_str)?;
    let tool = HostedTool::from_type(kind)?;
    let key = value
        .get("item_id")
        .and_then(Value::as_str)
        .or_else(|| value.get("id").and_then(Value::as_str));
    let phase = if kind.contains("completed") || kind.contains("done") {
        ToolPhase::Completed
    } else {
        ToolPhase::Started
    };
    Some(EnvelopeSignal::new(tool, phase, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Option<EnvelopeSignal> {
        normalize_envelope(&RawEnvelope(value))
    }

    #[test]
    fn output_item_added_web_search() {
        let signal = normalize(json!({
            "type": "response.output_item.added",
            "item": {"type": "web_search_call", "id": "ws_1"},
        }))
        .unwrap();
        assert_eq!(signal.tool, HostedTool::WebSearch);
        assert_eq!(signal.phase, ToolPhase::Started);
        assert_eq!(signal.key, "ws_1");
    }

    #[test]
    fn output_item_added_without_id_uses_category_key() {
        let signal = normalize(json!({
            "type": "response.output_item.added",
            "item": {"type": "mcp_list_tools"},
        }))
        .unwrap();
        assert_eq!(signal.tool, HostedTool::McpSearch);
        assert_eq!(signal.key, "mcp_search");
    }

    #[test]
    fn progress_and_completion_events() {
        let searching = normalize(json!({
            "type": "response.file_search_call.searching",
            "item_id": "fs_1",
        }))
        .unwrap();
        assert_eq!(searching.phase, ToolPhase::Started);
        assert_eq!(searching.key, "fs_1");

        let completed = normalize(json!({
            "type": "response.file_search_call.completed",
            "item_id": "fs_1",
        }))
        .unwrap();
        assert_eq!(completed.phase, ToolPhase::Completed);
    }

    #[test]
    fn mcp_progress_defaults_to_started() {
        let signal = normalize(json!({
            "type": "response.mcp_call.arguments_delta",
            "item_id": "mcp_1",
        }))
        .unwrap();
        assert_eq!(signal.tool, HostedTool::McpSearch);
        assert_eq!(signal.phase, ToolPhase::Started);
    }

    #[test]
    fn dict_fallback_reads_id_field() {
        // Version-skewed shape: exact suffix match fails ("done", not
        // ".completed"), generic probing classifies it.
        let signal = normalize(json!({
            "type": "web_search_call.done",
            "id": "ws_9",
        }))
        .unwrap();
        assert_eq!(signal.tool, HostedTool::WebSearch);
        assert_eq!(signal.phase, ToolPhase::Completed);
        assert_eq!(signal.key, "ws_9");
    }

    #[test]
    fn plain_string_envelope_is_skipped() {
        assert_eq!(normalize(json!("response.web_search_call.completed")), None);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        assert_eq!(normalize(json!({"type": "response.output_text.delta", "delta": "hi"})), None);
        assert_eq!(normalize(json!({"no_type": true})), None);
    }
}
