//! Stream translator: raw runtime updates in, ordered output events out.
//!
//! Routes each update's structured content items to the reasoning
//! accumulator and tool tracker (the authoritative channel), classifies
//! raw provider envelopes as a best-effort secondary channel, and
//! captures direct-text fallbacks. On normal end of input the buffered
//! reasoning text is flushed unconditionally; an upstream failure is
//! converted into exactly one error event and then propagated to the
//! caller.

use std::time::Duration;

use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, error};

use crate::error::PlumeError;
use crate::types::{AgentUpdate, ContentItem, OutputEvent};

use super::envelope::{normalize_envelope, ToolPhase};
use super::reasoning::ReasoningAccumulator;
use super::tools::{ToolTracker, UNKNOWN_TOOL};

/// Translator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorState {
    Running,
    Finished,
    Failed,
}

/// Per-stream translator. Owns the accumulator and tracker for exactly
/// one in-flight stream; construct a fresh one per request.
#[derive(Debug)]
pub struct StreamTranslator {
    reasoning: ReasoningAccumulator,
    tools: ToolTracker,
    state: TranslatorState,
}

impl Default for StreamTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamTranslator {
    pub fn new() -> Self {
        Self {
            reasoning: ReasoningAccumulator::new(),
            tools: ToolTracker::new(),
            state: TranslatorState::Running,
        }
    }

    /// Translator with a custom reasoning throttle interval.
    pub fn with_throttle(throttle: Duration) -> Self {
        Self {
            reasoning: ReasoningAccumulator::with_throttle(throttle),
            ..Self::new()
        }
    }

    pub fn state(&self) -> TranslatorState {
        self.state
    }

    /// Route one update, returning output events in arrival order.
    pub fn apply(&mut self, update: &AgentUpdate) -> Vec<OutputEvent> {
        let mut out = Vec::new();

        for item in &update.contents {
            match item {
                ContentItem::TextReasoning { text } if !text.is_empty() => {
                    if let Some(full) = self.reasoning.ingest(text) {
                        out.push(OutputEvent::ReasoningReplace { text: full });
                    }
                }
                ContentItem::FunctionCall { name, call_id } => {
                    let name = name.as_deref().filter(|n| !n.is_empty());
                    let key = call_id
                        .as_deref()
                        .filter(|id| !id.is_empty())
                        .or(name)
                        .unwrap_or(UNKNOWN_TOOL);
                    if let Some(event) = self.tools.on_started(key, name) {
                        out.push(OutputEvent::Tool(event));
                    }
                }
                ContentItem::FunctionResult { name, call_id } => {
                    let key = call_id.as_deref().unwrap_or("");
                    if let Some(event) = self.tools.on_completed(key, name.as_deref()) {
                        out.push(OutputEvent::Tool(event));
                    }
                }
                ContentItem::Text { text } if !text.is_empty() => {
                    out.push(OutputEvent::Text { text: text.clone() });
                }
                _ => {
                    debug!(?item, "ignoring content item");
                }
            }
        }

        // Secondary channel: hosted tool activity only surfaces through
        // the raw provider event. The tracker suppresses anything the
        // structured path already recorded.
        if let Some(envelope) = &update.raw {
            if let Some(signal) = normalize_envelope(envelope) {
                let tool = signal.tool.as_str();
                let event = match signal.phase {
                    ToolPhase::Started => self.tools.on_started(&signal.key, Some(tool)),
                    ToolPhase::Completed => self.tools.on_completed(&signal.key, Some(tool)),
                };
                if let Some(event) = event {
                    out.push(OutputEvent::Tool(event));
                }
            }
        }

        // Last-resort capture of provider shapes that skip the
        // content-item structure.
        if update.contents.is_empty() {
            if let Some(text) = update.text.as_deref().filter(|t| !t.is_empty()) {
                out.push(OutputEvent::Text {
                    text: text.to_string(),
                });
            }
        }

        out
    }

    /// End of input: flush any buffered reasoning text.
    pub fn finish(&mut self) -> Option<OutputEvent> {
        self.state = TranslatorState::Finished;
        self.reasoning.flush().map(|text| OutputEvent::ReasoningReplace {
            text: text.to_string(),
        })
    }

    /// Upstream failure: produce the single error event for emission.
    /// The caller still owns propagating the failure itself.
    pub fn fail(&mut self, err: &PlumeError) -> OutputEvent {
        self.state = TranslatorState::Failed;
        OutputEvent::Error {
            message: err.to_string(),
        }
    }

    /// Consume the raw update sequence and produce the ordered output
    /// event sequence. On an upstream error, one error event is emitted
    /// and then the error itself is yielded before the stream ends.
    pub fn translate(
        mut self,
        updates: BoxStream<'static, Result<AgentUpdate, PlumeError>>,
    ) -> BoxStream<'static, Result<OutputEvent, PlumeError>> {
        let stream = async_stream::stream! {
            let mut updates = std::pin::pin!(updates);
            while let Some(item) = updates.next().await {
                match item {
                    Ok(update) => {
                        for event in self.apply(&update) {
                            yield Ok(event);
                        }
                    }
                    Err(err) => {
                        error!(error = %err, "agent stream failed");
                        yield Ok(self.fail(&err));
                        yield Err(err);
                        return;
                    }
                }
            }
            if let Some(event) = self.finish() {
                yield Ok(event);
            }
        };
        Box::pin(stream)
    }
}
