//! Tool lifecycle deduplication.
//!
//! The same tool invocation can be reported through several raw shapes
//! (structured content items, typed provider events, dict-shaped
//! fallbacks), and streaming updates re-send the same items. The tracker
//! guarantees at most one `started` and one `completed` event per
//! invocation key, and remembers resolved tool names so an anonymous
//! completion still reports the name its start carried.

use std::collections::{HashMap, HashSet};

use crate::types::ToolEvent;

/// Placeholder name when no raw shape ever resolved one.
pub const UNKNOWN_TOOL: &str = "unknown_tool";

/// Per-stream tool lifecycle tracker. Construct one per in-flight
/// stream; never share across requests.
#[derive(Debug, Default)]
pub struct ToolTracker {
    started: HashSet<String>,
    completed: HashSet<String>,
    names: HashMap<String, String>,
}

impl ToolTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `started` signal for `key`.
    ///
    /// Returns the event to emit the first time the key is seen, `None`
    /// on duplicates. A resolvable name is remembered for later
    /// anonymous completions.
    pub fn on_started(&mut self, key: &str, name: Option<&str>) -> Option<ToolEvent> {
        let name = name.filter(|n| !n.is_empty() && *n != UNKNOWN_TOOL);
        if let Some(name) = name {
            self.names.insert(key.to_string(), name.to_string());
        }
        if self.started.contains(key) {
            return None;
        }
        self.started.insert(key.to_string());
        let tool = name
            .map(str::to_string)
            .or_else(|| self.names.get(key).cloned())
            .unwrap_or_else(|| UNKNOWN_TOOL.to_string());
        Some(ToolEvent::started(tool))
    }

    /// Record a `completed` signal for `key`.
    ///
    /// The name resolves from the explicit signal, then the name its
    /// `started` carried, then the placeholder. Empty keys and repeat
    /// completions emit nothing.
    pub fn on_completed(&mut self, key: &str, name: Option<&str>) -> Option<ToolEvent> {
        let tool = name
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| self.names.get(key).cloned())
            .unwrap_or_else(|| UNKNOWN_TOOL.to_string());
        if key.is_empty() || self.completed.contains(key) {
            return None;
        }
        self.completed.insert(key.to_string());
        Some(ToolEvent::completed(tool))
    }
}
