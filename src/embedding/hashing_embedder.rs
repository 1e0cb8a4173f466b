//! Deterministic feature-hashing embedder.
//!
//! Maps the normalized words and word bigrams of a text into a fixed number
//! of buckets with a fixed-seed hash, then L2-normalizes the result. Texts
//! that share words get positive cosine similarity; texts with no words in
//! common land near zero. It carries no model weights, so it is useful for
//! the CLI, benchmarks and anywhere a real model is unavailable.

use std::hash::BuildHasher;

use ahash::RandomState;
use async_trait::async_trait;

use crate::analysis::normalizer::TranscriptNormalizer;
use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{Result, SignpostError};
use crate::vector::Vector;

/// Default number of hash buckets.
pub const DEFAULT_DIMENSION: usize = 256;

/// Weight given to word bigrams relative to single words.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Bag-of-words embedder using signed feature hashing.
pub struct HashingTextEmbedder {
    dimension: usize,
    hasher: RandomState,
    normalizer: TranscriptNormalizer,
}

impl std::fmt::Debug for HashingTextEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashingTextEmbedder")
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl HashingTextEmbedder {
    /// Create an embedder with `dimension` buckets.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(SignpostError::invalid_argument(
                "embedding dimension must be greater than zero",
            ));
        }

        Ok(Self {
            dimension,
            hasher: RandomState::with_seeds(
                0x5157_0a7e_9e37_79b9,
                0x2545_f491_4f6c_dd1d,
                0x9e37_79b9_7f4a_7c15,
                0xbf58_476d_1ce4_e5b9,
            ),
            normalizer: TranscriptNormalizer::new()?,
        })
    }

    fn accumulate(&self, feature: &str, weight: f32, data: &mut [f32]) {
        let hash = self.hasher.hash_one(feature);
        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
        data[bucket] += sign * weight;
    }

    fn embed_sync(&self, text: &str) -> Vector {
        let normalized = self.normalizer.normalize(text);
        let tokens: Vec<&str> = normalized.tokens().collect();
        let mut data = vec![0.0; self.dimension];

        for token in &tokens {
            self.accumulate(token, 1.0, &mut data);
        }
        for pair in tokens.windows(2) {
            self.accumulate(&format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT, &mut data);
        }

        let mut vector = Vector::new(data);
        vector.normalize();
        vector
    }
}

#[async_trait]
impl TextEmbedder for HashingTextEmbedder {
    async fn embed(&self, text: &str) -> Result<Vector> {
        Ok(self.embed_sync(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|text| self.embed_sync(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(HashingTextEmbedder::new(0).is_err());
    }

    #[tokio::test]
    async fn test_embedding_is_deterministic() {
        let embedder = HashingTextEmbedder::new(DEFAULT_DIMENSION).unwrap();
        let a = embedder.embed("read the page").await.unwrap();
        let b = embedder.embed("Read the page!").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimension(), DEFAULT_DIMENSION);
        assert!((a.norm() - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_words_score_higher() {
        let embedder = HashingTextEmbedder::new(1024).unwrap();
        let query = embedder.embed("how far is the door").await.unwrap();
        let near = embedder.embed("how far").await.unwrap();
        let far = embedder.embed("currency").await.unwrap();

        let near_score = query.cosine_similarity(&near).unwrap();
        let far_score = query.cosine_similarity(&far).unwrap();
        assert!(near_score > far_score);
        assert!(near_score > 0.3);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let embedder = HashingTextEmbedder::new(8).unwrap();
        let v = embedder.embed("  ?! ").await.unwrap();
        assert_eq!(v.norm(), 0.0);
    }

    #[tokio::test]
    async fn test_embed_batch_matches_embed() {
        let embedder = HashingTextEmbedder::new(64).unwrap();
        let batch = embedder.embed_batch(&["music", "news"]).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("music").await.unwrap());
        assert_eq!(batch[1], embedder.embed("news").await.unwrap());
    }

    #[test]
    fn test_name() {
        let embedder = HashingTextEmbedder::new(4).unwrap();
        assert_eq!(embedder.name(), "hashing");
        assert_eq!(embedder.dimension(), 4);
    }
}
