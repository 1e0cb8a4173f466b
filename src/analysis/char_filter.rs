//! Char filter implementations for transcript normalization.
//!
//! Char filters rewrite the raw transcript string before any phrase matching
//! or embedding happens. They are chained by
//! [`TranscriptNormalizer`](crate::analysis::normalizer::TranscriptNormalizer).
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use signpost::analysis::char_filter::CharFilter;
//! use signpost::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Switch To Music"), "switch to music");
//! ```

/// Trait for character filters that transform a transcript.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// # Arguments
    ///
    /// * `input` - The input text to filter
    ///
    /// # Returns
    ///
    /// The filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
