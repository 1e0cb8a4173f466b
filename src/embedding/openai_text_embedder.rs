//! OpenAI API-based text embedder implementation.
//!
//! Requires the `embeddings-openai` feature to be enabled.

#[cfg(feature = "embeddings-openai")]
use async_trait::async_trait;
#[cfg(feature = "embeddings-openai")]
use reqwest::Client;
#[cfg(feature = "embeddings-openai")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "embeddings-openai")]
use crate::embedding::text_embedder::TextEmbedder;
#[cfg(feature = "embeddings-openai")]
use crate::error::{Result, SignpostError};
#[cfg(feature = "embeddings-openai")]
use crate::vector::Vector;

/// Embeddings endpoint used when no override is configured.
#[cfg(feature = "embeddings-openai")]
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Request structure for OpenAI Embeddings API.
#[cfg(feature = "embeddings-openai")]
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    /// Model identifier to use for embeddings.
    model: &'a str,
    /// Input texts to embed (batch).
    input: Vec<&'a str>,
    /// Optional custom dimension (only for newer models).
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

/// Response structure from OpenAI Embeddings API.
#[cfg(feature = "embeddings-openai")]
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[cfg(feature = "embeddings-openai")]
#[derive(Debug, Deserialize)]
struct EmbeddingData {
    /// Position of the input this embedding belongs to.
    index: usize,
    embedding: Vec<f32>,
}

/// OpenAI API-based text embedder.
///
/// Each call is a network round trip; the router only embeds the transcript
/// per request, and catalog phrases once at startup through `embed_batch`.
///
/// # Examples
///
/// ```no_run
/// use signpost::embedding::text_embedder::TextEmbedder;
/// use signpost::embedding::openai_text_embedder::OpenAITextEmbedder;
///
/// # async fn example() -> signpost::error::Result<()> {
/// let embedder = OpenAITextEmbedder::new(
///     std::env::var("OPENAI_API_KEY").unwrap(),
///     "text-embedding-3-small".to_string()
/// )?;
///
/// let vector = embedder.embed("switch to music").await?;
/// println!("Embedding dimension: {}", embedder.dimension());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "embeddings-openai")]
pub struct OpenAITextEmbedder {
    client: Client,
    api_key: String,
    model: String,
    dimension: usize,
    endpoint: String,
}

#[cfg(feature = "embeddings-openai")]
impl std::fmt::Debug for OpenAITextEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAITextEmbedder")
            .field("model", &self.model)
            .field("dimension", &self.dimension)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(feature = "embeddings-openai")]
impl OpenAITextEmbedder {
    /// Create a new OpenAI embedder.
    ///
    /// # Supported Models
    ///
    /// - `text-embedding-3-small` - 1536 dimensions
    /// - `text-embedding-3-large` - 3072 dimensions
    /// - `text-embedding-ada-002` - 1536 dimensions, legacy model
    ///
    /// # Errors
    ///
    /// Returns an error if the model name is not recognized or the API key is empty.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        match model.as_str() {
            "text-embedding-3-small" | "text-embedding-3-large" | "text-embedding-ada-002" => {}
            _ => {
                return Err(SignpostError::config(format!(
                    "Unknown OpenAI embedding model: {}. Supported models: \
                     text-embedding-3-small, text-embedding-3-large, text-embedding-ada-002",
                    model
                )));
            }
        }

        let dimension = Self::default_dimension(&model);
        Self::with_dimension(api_key, model, dimension)
    }

    /// Create an embedder with a custom dimension.
    pub fn with_dimension(api_key: String, model: String, dimension: usize) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SignpostError::config("OpenAI API key is empty"));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            dimension,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Send requests to a different endpoint (proxies, compatible servers).
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn default_dimension(model: &str) -> usize {
        match model {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    async fn request(&self, input: Vec<&str>) -> Result<Vec<Vector>> {
        let expected = input.len();
        let dimensions = if self.dimension == Self::default_dimension(&self.model) {
            None
        } else {
            Some(self.dimension)
        };

        let request = EmbeddingRequest {
            model: &self.model,
            input,
            dimensions,
        };

        let http_response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SignpostError::embedding(format!("OpenAI API request failed: {e}")))?;

        let status = http_response.status();
        let response_text = http_response.text().await.map_err(|e| {
            SignpostError::embedding(format!("Failed to read response text: {e}"))
        })?;

        if !status.is_success() {
            return Err(SignpostError::embedding(format!(
                "OpenAI API error (status {status}): {response_text}"
            )));
        }

        let mut response: EmbeddingResponse = serde_json::from_str(&response_text)
            .map_err(|e| SignpostError::embedding(format!("Failed to parse OpenAI response: {e}")))?;

        if response.data.len() != expected {
            return Err(SignpostError::embedding(format!(
                "OpenAI returned {} embeddings for {} inputs",
                response.data.len(),
                expected
            )));
        }

        response.data.sort_by_key(|d| d.index);
        Ok(response
            .data
            .into_iter()
            .map(|d| Vector::new(d.embedding))
            .collect())
    }
}

#[cfg(feature = "embeddings-openai")]
#[async_trait]
impl TextEmbedder for OpenAITextEmbedder {
    async fn embed(&self, text: &str) -> Result<Vector> {
        self.request(vec![text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SignpostError::embedding("No embedding in response"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts.to_vec()).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model
    }
}
