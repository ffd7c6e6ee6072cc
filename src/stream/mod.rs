//! Streaming event-translation core.
//!
//! Consumes the hosted runtime's raw update sequence and re-emits a
//! clean, de-duplicated, ordered sequence of typed output events.

pub mod envelope;
pub mod reasoning;
pub mod tools;
pub mod translator;

pub use envelope::{normalize_envelope, EnvelopeSignal, HostedTool, ToolPhase};
pub use reasoning::{ReasoningAccumulator, REASONING_THROTTLE};
pub use tools::{ToolTracker, UNKNOWN_TOOL};
pub use translator::{StreamTranslator, TranslatorState};
