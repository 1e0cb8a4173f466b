//! Text embedding support for semantic routing.
//!
//! The router never runs a model itself. It talks to an embedding provider
//! through the [`TextEmbedder`](text_embedder::TextEmbedder) trait, so any
//! local model or remote API can be plugged in.
//!
//! # Feature Flags
//!
//! - `embeddings-openai` - OpenAI embeddings API implementation (cloud-based)
//!
//! Without any feature enabled, the deterministic
//! [`HashingTextEmbedder`](hashing_embedder::HashingTextEmbedder) is available.
//! It needs no model files and is what the CLI uses by default.

pub mod hashing_embedder;
pub mod openai_text_embedder;
pub mod text_embedder;

pub use hashing_embedder::HashingTextEmbedder;
#[cfg(feature = "embeddings-openai")]
pub use openai_text_embedder::OpenAITextEmbedder;
pub use text_embedder::TextEmbedder;
