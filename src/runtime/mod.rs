//! Hosted agent runtime contract.

pub mod responses;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::Result;
use crate::types::AgentUpdate;

/// Reasoning depth requested from the model.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReasoningEffort {
    Off,
    Low,
    #[default]
    Medium,
    High,
}

/// Reasoning summary display mode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReasoningSummary {
    Off,
    #[default]
    Auto,
    Concise,
    Detailed,
}

/// Per-session options forwarded to the hosted runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub reasoning_effort: ReasoningEffort,
    pub reasoning_summary: ReasoningSummary,
}

impl SessionOptions {
    /// Render the `reasoning` options object, omitting anything set to
    /// `off`. Returns `None` when both settings are off.
    pub fn reasoning_options(&self) -> Option<serde_json::Value> {
        let mut opts = serde_json::Map::new();
        if self.reasoning_effort != ReasoningEffort::Off {
            opts.insert(
                "effort".to_string(),
                self.reasoning_effort.to_string().into(),
            );
        }
        if self.reasoning_summary != ReasoningSummary::Off {
            opts.insert(
                "summary".to_string(),
                self.reasoning_summary.to_string().into(),
            );
        }
        if opts.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(opts))
        }
    }
}

/// One run launched against the hosted runtime.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub id: Uuid,
    /// System prompt.
    pub instructions: String,
    /// The fully built user query.
    pub input: String,
    /// Vendor-format tool specs (hosted and function tools).
    pub tools: Vec<serde_json::Value>,
    pub options: SessionOptions,
}

impl RunRequest {
    pub fn new(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            instructions: instructions.into(),
            input: input.into(),
            tools: Vec::new(),
            options: SessionOptions::default(),
        }
    }
}

/// An opaque source of agent updates.
///
/// Implementations own tool execution, model inference, and retrieval;
/// this crate only consumes the resulting update sequence.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Launch a run and return its raw update sequence.
    async fn run(&self, request: RunRequest) -> Result<BoxStream<'static, Result<AgentUpdate>>>;
}
