//! Transcript normalization.
//!
//! Speech-to-text output arrives with arbitrary casing, punctuation and
//! spacing. Every phrase stored in the catalog and every incoming transcript
//! goes through the same [`TranscriptNormalizer`] so that matching compares
//! like with like:
//!
//! 1. lowercase
//! 2. strip `,` `.` `!` `?` `;` `:`
//! 3. collapse whitespace runs to a single space and trim
//!
//! # Examples
//!
//! ```
//! use signpost::analysis::normalizer::TranscriptNormalizer;
//!
//! let normalizer = TranscriptNormalizer::new().unwrap();
//! let text = normalizer.normalize("  Switch to   Currency, please! ");
//! assert_eq!(text.as_str(), "switch to currency please");
//! assert!(text.contains_phrase("currency"));
//! ```

use std::fmt;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::error::Result;

/// Punctuation removed from transcripts before matching.
pub const STRIPPED_PUNCTUATION: &str = r"[,.!?;:]";

/// A chain of char filters applied to every transcript and catalog phrase.
pub struct TranscriptNormalizer {
    filters: Vec<Box<dyn CharFilter>>,
}

impl fmt::Debug for TranscriptNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptNormalizer")
            .field(
                "filters",
                &self.filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TranscriptNormalizer {
    /// Create the standard normalizer (lowercase, punctuation strip, whitespace collapse).
    pub fn new() -> Result<Self> {
        Ok(Self {
            filters: vec![
                Box::new(LowercaseCharFilter::new()),
                Box::new(PatternReplaceCharFilter::new(STRIPPED_PUNCTUATION, "")?),
                Box::new(PatternReplaceCharFilter::new(r"\s+", " ")?),
            ],
        })
    }

    /// Normalize a transcript or phrase.
    pub fn normalize(&self, input: &str) -> NormalizedText {
        let mut text = input.to_string();
        for filter in &self.filters {
            text = filter.filter(&text);
        }
        NormalizedText(text.trim().to_string())
    }

    /// Names of the char filters in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

/// Text that has already been through a [`TranscriptNormalizer`].
///
/// Phrase containment is a plain substring test, so `"song"` is found in
/// `"play my songs"`. Prefix stripping works on whole words so that a
/// trigger is always followed by a space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether nothing is left after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace-separated words.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// Whether `phrase` occurs anywhere in the text.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        !phrase.is_empty() && self.0.contains(phrase)
    }

    /// If the text begins with `phrase` on a word boundary, return the
    /// remainder after it (trimmed, possibly empty).
    pub fn strip_phrase_prefix(&self, phrase: &str) -> Option<&str> {
        strip_phrase_prefix(&self.0, phrase)
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// If normalized `text` begins with `phrase` on a word boundary, return the
/// remainder after it (possibly empty).
pub fn strip_phrase_prefix<'t>(text: &'t str, phrase: &str) -> Option<&'t str> {
    if phrase.is_empty() {
        return None;
    }
    let rest = text.strip_prefix(phrase)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
