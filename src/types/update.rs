//! Raw update types produced by the hosted agent runtime.
//!
//! One [`AgentUpdate`] is one unit of the runtime's asynchronous update
//! sequence. Its shape is only partially documented by the vendor: the
//! structured [`ContentItem`] list is the authoritative channel, while
//! [`RawEnvelope`] preserves the provider's raw event for best-effort
//! hosted-tool detection.

use serde::{Deserialize, Serialize};

/// One structured content item inside an update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// A reasoning-text fragment (cumulative snapshot or pure delta).
    TextReasoning { text: String },
    /// A tool is being invoked.
    FunctionCall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        call_id: Option<String>,
    },
    /// A tool invocation returned a result.
    FunctionResult {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        call_id: Option<String>,
    },
    /// Regular assistant text output.
    Text { text: String },
    /// Anything else the runtime may add in future versions.
    #[serde(other)]
    Other,
}

/// Vendor-specific side-channel event attached to an update.
///
/// The provider emits progress events (hosted web/file search, MCP calls)
/// that are not folded into [`ContentItem`]s. They are preserved here,
/// untyped, for the translator's secondary detection path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawEnvelope(pub serde_json::Value);

impl From<serde_json::Value> for RawEnvelope {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// One unit from the runtime's update sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentUpdate {
    /// Structured content items (authoritative channel).
    #[serde(default)]
    pub contents: Vec<ContentItem>,
    /// Direct text carried outside the content-item structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Raw provider event, when the runtime exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawEnvelope>,
}

impl AgentUpdate {
    /// Update carrying a single content item.
    pub fn from_content(item: ContentItem) -> Self {
        Self {
            contents: vec![item],
            ..Self::default()
        }
    }

    /// Update carrying only a raw provider event.
    pub fn from_raw(value: serde_json::Value) -> Self {
        Self {
            raw: Some(RawEnvelope(value)),
            ..Self::default()
        }
    }
}
