//! Plume — agent-backed social content backend.
//!
//! Drives a hosted large-language-model agent to produce social-media
//! content and re-emits the runtime's heterogeneous update stream as a
//! clean, ordered, de-duplicated sequence of tagged wire events
//! (reasoning replaces, tool lifecycle markers, plain text) suitable for
//! a one-way server-to-client stream, plus an in-memory conversation
//! store.
//!
//! # Quick Start
//!
//! ```no_run
//! use plume::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn example() -> plume::error::Result<()> {
//! let config = PlumeConfig::from_env();
//! let runtime = ResponsesClient::new(&config)?;
//! let request = ContentRequest::new("Announce our v2 launch")
//!     .platforms(["linkedin", "x"]);
//! let mut chunks = plume::agent::stream_content(&runtime, &config, request).await?;
//! while let Some(chunk) = chunks.next().await {
//!     print!("{}", chunk?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod prelude;
pub mod runtime;
pub mod store;
pub mod stream;
pub mod types;
pub mod wire;
