//! # Signpost
//!
//! Intent routing for voice-driven assistants: given a speech-to-text
//! transcript and the feature currently on screen, decide whether the user
//! wants to navigate, run an action, or ask a question, and which feature
//! should handle it.
//!
//! ## Features
//!
//! - Immutable feature catalog with deterministic phrase deduplication
//! - Trigger phrase, literal command and substring keyword matching
//! - Embedding-based semantic fallback with precomputed phrase embeddings
//! - Pluggable embedding providers (hashing, OpenAI)
//! - Concurrent batch routing
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use signpost::catalog::Catalog;
//! use signpost::embedding::HashingTextEmbedder;
//! use signpost::router::{Intent, IntentEngine, RouterConfig};
//!
//! # tokio_test::block_on(async {
//! let engine = IntentEngine::new(
//!     Arc::new(Catalog::builtin()?),
//!     Arc::new(HashingTextEmbedder::new(256)?),
//!     RouterConfig::default(),
//! )
//! .await?;
//!
//! let decision = engine.resolve("switch to currency", None).await?;
//! assert_eq!(decision.intent(), Intent::Navigate);
//! assert_eq!(decision.target(), Some("Currency"));
//! # Ok::<(), signpost::error::SignpostError>(())
//! # }).unwrap();
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod embedding;
pub mod error;
pub mod router;
pub mod vector;

pub mod prelude {
    pub use crate::catalog::{Catalog, FeatureDefinition};
    pub use crate::embedding::{HashingTextEmbedder, TextEmbedder};
    pub use crate::error::{Result, SignpostError};
    pub use crate::router::{Intent, IntentDecision, IntentEngine, RouteRequest, RouterConfig};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
