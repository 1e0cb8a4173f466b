//! Dense embedding vectors and cosine similarity.
//!
//! Embedders produce [`Vector`]s; the semantic router compares them with
//! [`Vector::cosine_similarity`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignpostError};

/// A dense vector produced by an embedder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// The vector dimensions as floating point values.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a new vector with the given dimensions.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Calculate the L2 norm (magnitude) of this vector.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalize this vector to unit length.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.data {
                *value /= norm;
            }
        }
    }

    /// Get a normalized copy of this vector.
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.normalize();
        normalized
    }

    /// Check if this vector contains any NaN or infinite values.
    pub fn is_valid(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Validate that this vector has the expected dimension.
    pub fn validate_dimension(&self, expected_dim: usize) -> Result<()> {
        if self.data.len() != expected_dim {
            return Err(SignpostError::embedding(format!(
                "Vector dimension mismatch: expected {}, got {}",
                expected_dim,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Cosine similarity in `[-1, 1]`.
    ///
    /// A zero vector on either side yields `0.0`. Vectors of different
    /// dimension are an error.
    pub fn cosine_similarity(&self, other: &Vector) -> Result<f32> {
        other.validate_dimension(self.dimension())?;

        let dot_product: f32 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(x, y)| x * y)
            .sum();
        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok((dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0))
        }
    }

    /// Mean cosine similarity between this vector and each of `others`.
    ///
    /// Returns `None` when `others` is empty.
    pub fn mean_cosine_similarity(&self, others: &[Vector]) -> Result<Option<f32>> {
        if others.is_empty() {
            return Ok(None);
        }
        let mut total = 0.0;
        for other in others {
            total += self.cosine_similarity(other)?;
        }
        Ok(Some(total / others.len() as f32))
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}
