//! Shared fixtures for routing tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use signpost::embedding::TextEmbedder;
use signpost::error::{Result, SignpostError};
use signpost::vector::Vector;

/// Embedder with one dimension per distinct word.
///
/// Texts with no words in common are exactly orthogonal, which keeps
/// similarity scores predictable in assertions.
pub struct VocabularyEmbedder {
    dimension: usize,
    vocabulary: Mutex<HashMap<String, usize>>,
}

impl VocabularyEmbedder {
    pub fn new() -> Self {
        Self {
            dimension: 1024,
            vocabulary: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TextEmbedder for VocabularyEmbedder {
    async fn embed(&self, text: &str) -> Result<Vector> {
        let mut data = vec![0.0; self.dimension];
        let mut vocabulary = self
            .vocabulary
            .lock()
            .map_err(|_| SignpostError::other("vocabulary lock poisoned"))?;
        for word in text.split_whitespace() {
            let next = vocabulary.len();
            let slot = *vocabulary.entry(word.to_string()).or_insert(next);
            data[slot % self.dimension] += 1.0;
        }
        Ok(Vector::new(data).normalized())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "vocabulary"
    }
}

/// Embeds phrases in batch but fails on every single-text request, so the
/// index builds and only transcript embedding errors.
pub struct FailingEmbedder;

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vector> {
        Err(SignpostError::embedding("embedding service unavailable"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|_| Vector::new(vec![1.0; 8])).collect())
    }

    fn dimension(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "failing"
    }
}
