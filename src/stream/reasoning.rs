//! Reasoning-text accumulation with throttled emission.
//!
//! The runtime streams many small reasoning fragments per second, and a
//! fragment may be a cumulative snapshot of everything so far, a pure
//! delta, or a duplicate of text already held. The accumulator reconciles
//! all three into one authoritative running text and rate-limits
//! emission; [`ReasoningAccumulator::flush`] bypasses the throttle so the
//! final partial thought is never lost at end of stream.

use std::time::{Duration, Instant};

/// Minimum wall-clock spacing between emitted reasoning snapshots.
pub const REASONING_THROTTLE: Duration = Duration::from_millis(100);

/// Per-stream reasoning reconciler. Construct one per in-flight stream;
/// never share across requests.
#[derive(Debug)]
pub struct ReasoningAccumulator {
    accumulated: String,
    last_emit: Option<Instant>,
    throttle: Duration,
}

impl Default for ReasoningAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReasoningAccumulator {
    pub fn new() -> Self {
        Self::with_throttle(REASONING_THROTTLE)
    }

    /// Accumulator with a custom throttle interval.
    pub fn with_throttle(throttle: Duration) -> Self {
        Self {
            accumulated: String::new(),
            last_emit: None,
            throttle,
        }
    }

    /// Merge one raw fragment into the running text.
    ///
    /// Returns the full accumulated text when the throttle allows an
    /// emission, `None` otherwise. The first emission is never throttled.
    pub fn ingest(&mut self, fragment: &str) -> Option<String> {
        if fragment.is_empty() {
            return None;
        }

        if !self.accumulated.is_empty() && fragment.starts_with(&self.accumulated) {
            // Cumulative snapshot: replace wholesale.
            self.accumulated = fragment.to_string();
        } else if self.accumulated.ends_with(fragment) {
            // Duplicate delta, already held.
        } else {
            self.accumulated.push_str(fragment);
        }

        if self.throttle_open() {
            self.last_emit = Some(Instant::now());
            Some(self.accumulated.clone())
        } else {
            None
        }
    }

    /// The accumulated text for unconditional end-of-stream emission,
    /// regardless of throttle state. `None` when nothing accumulated.
    pub fn flush(&self) -> Option<&str> {
        if self.accumulated.is_empty() {
            None
        } else {
            Some(&self.accumulated)
        }
    }

    fn throttle_open(&self) -> bool {
        match self.last_emit {
            None => true,
            Some(at) => at.elapsed() >= self.throttle,
        }
    }
}
