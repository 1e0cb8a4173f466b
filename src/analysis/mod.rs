//! Text analysis for transcripts and catalog phrases.
//!
//! This module provides the char filters and the normalizer that bring raw
//! speech-to-text output and configured phrases into a single comparable form.

pub mod char_filter;
pub mod normalizer;

// Re-export commonly used types
pub use normalizer::{NormalizedText, TranscriptNormalizer, strip_phrase_prefix};
