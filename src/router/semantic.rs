//! Embedding-based routing, used when no exact phrase matched.
//!
//! Keyword and action-phrase embeddings are computed once into a
//! [`SemanticIndex`]. Each request then costs a single embedder call for the
//! transcript; every comparison is a mean cosine similarity between the
//! transcript and a feature's (or action's) phrase embeddings.

use log::{debug, info, warn};

use crate::analysis::normalizer::NormalizedText;
use crate::catalog::{Catalog, Feature};
use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{Result, SignpostError};
use crate::router::config::RouterConfig;
use crate::router::decision::{IntentDecision, ResolutionStage};
use crate::vector::Vector;

/// Precomputed phrase embeddings of one feature.
#[derive(Debug, Clone, Default)]
struct FeatureEmbeddings {
    keywords: Vec<Vector>,
    /// One entry per action, in action order.
    actions: Vec<Vec<Vector>>,
}

/// Phrase embeddings for a whole catalog, indexed like
/// [`Catalog::features`].
#[derive(Debug, Clone)]
pub struct SemanticIndex {
    dimension: usize,
    embedder_name: String,
    features: Vec<FeatureEmbeddings>,
}

impl SemanticIndex {
    /// Embed every keyword and action phrase of `catalog` with one batch call.
    ///
    /// # Errors
    ///
    /// Fails when the embedder fails, returns the wrong number of vectors, or
    /// returns a vector whose dimension differs from `embedder.dimension()`.
    pub async fn build(catalog: &Catalog, embedder: &dyn TextEmbedder) -> Result<Self> {
        let dimension = embedder.dimension();

        let mut phrases: Vec<&str> = Vec::new();
        for feature in catalog.features() {
            phrases.extend(feature.keywords().iter().map(NormalizedText::as_str));
            for action in feature.actions() {
                phrases.extend(action.phrases().iter().map(NormalizedText::as_str));
            }
        }

        let vectors = embedder.embed_batch(&phrases).await?;
        if vectors.len() != phrases.len() {
            return Err(SignpostError::embedding(format!(
                "embedder '{}' returned {} vectors for {} phrases",
                embedder.name(),
                vectors.len(),
                phrases.len()
            )));
        }
        for vector in &vectors {
            vector.validate_dimension(dimension)?;
        }

        let mut vectors = vectors.into_iter();
        let mut features = Vec::with_capacity(catalog.len());
        for feature in catalog.features() {
            let keywords = vectors.by_ref().take(feature.keywords().len()).collect();
            let actions = feature
                .actions()
                .iter()
                .map(|action| vectors.by_ref().take(action.phrases().len()).collect())
                .collect();
            features.push(FeatureEmbeddings { keywords, actions });
        }

        info!(
            "built semantic index: {} phrases, dimension {}, embedder '{}'",
            phrases.len(),
            dimension,
            embedder.name()
        );

        Ok(Self {
            dimension,
            embedder_name: embedder.name().to_string(),
            features,
        })
    }

    /// Dimension of every stored vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Name of the embedder the index was built with.
    pub fn embedder_name(&self) -> &str {
        &self.embedder_name
    }

    /// Number of features covered.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Total number of stored phrase embeddings.
    pub fn phrase_count(&self) -> usize {
        self.features
            .iter()
            .map(|f| f.keywords.len() + f.actions.iter().map(Vec::len).sum::<usize>())
            .sum()
    }

    /// Check that the index was built for a catalog laid out like `catalog`:
    /// same features, and per feature the same number of keywords, actions
    /// and phrases per action.
    pub fn check_layout(&self, catalog: &Catalog) -> Result<()> {
        if self.features.len() != catalog.len() {
            return Err(SignpostError::invalid_argument(format!(
                "semantic index covers {} features, catalog has {}",
                self.features.len(),
                catalog.len()
            )));
        }
        for (feature, embeddings) in catalog.features().iter().zip(&self.features) {
            let actions_match = embeddings.actions.len() == feature.actions().len()
                && embeddings
                    .actions
                    .iter()
                    .zip(feature.actions())
                    .all(|(vectors, action)| vectors.len() == action.phrases().len());
            if embeddings.keywords.len() != feature.keywords().len() || !actions_match {
                return Err(SignpostError::invalid_argument(format!(
                    "semantic index does not match the phrases of feature '{}'",
                    feature.name()
                )));
            }
        }
        Ok(())
    }

    fn has_keywords(&self) -> bool {
        self.features.iter().any(|f| !f.keywords.is_empty())
    }

    fn actions_of(&self, feature: &Feature) -> &[Vec<Vector>] {
        self.features
            .get(feature.id().index())
            .map(|f| f.actions.as_slice())
            .unwrap_or(&[])
    }
}

/// Semantic routing over a catalog and its index.
pub struct SemanticRouter<'a> {
    catalog: &'a Catalog,
    index: &'a SemanticIndex,
    embedder: &'a dyn TextEmbedder,
    config: &'a RouterConfig,
}

impl<'a> SemanticRouter<'a> {
    pub fn new(
        catalog: &'a Catalog,
        index: &'a SemanticIndex,
        embedder: &'a dyn TextEmbedder,
        config: &'a RouterConfig,
    ) -> Self {
        Self {
            catalog,
            index,
            embedder,
            config,
        }
    }

    /// Route `transcript` by embedding similarity. Always produces a decision.
    ///
    /// With an active feature, its actions are scored first and the best one
    /// wins if it reaches `action_threshold`. Otherwise the feature with the
    /// highest mean keyword similarity receives the transcript as a query,
    /// unless that score is below `fallback_threshold`, in which case the
    /// default feature does.
    pub async fn route(
        &self,
        transcript: &str,
        text: &NormalizedText,
        active: Option<&Feature>,
    ) -> Result<IntentDecision> {
        let active_actions = active.map(|f| self.index.actions_of(f)).unwrap_or(&[]);
        let has_action_phrases = active_actions.iter().any(|phrases| !phrases.is_empty());
        if !self.index.has_keywords() && !has_action_phrases {
            debug!("semantic: no phrase embeddings to compare against");
            return Ok(IntentDecision::unknown(0.0, ResolutionStage::Semantic));
        }

        let query = self.embedder.embed(text.as_str()).await?;
        query.validate_dimension(self.index.dimension())?;

        if let Some(feature) = active {
            if let Some(decision) = self.route_action(&query, feature, active_actions)? {
                return Ok(decision);
            }
        }

        self.route_feature(transcript, &query)
    }

    fn route_action(
        &self,
        query: &Vector,
        feature: &Feature,
        action_vectors: &[Vec<Vector>],
    ) -> Result<Option<IntentDecision>> {
        let mut best: Option<(usize, f32)> = None;
        for (position, phrases) in action_vectors.iter().enumerate() {
            let Some(score) = query.mean_cosine_similarity(phrases)? else {
                continue;
            };
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((position, score));
            }
        }

        let Some((position, score)) = best else {
            return Ok(None);
        };
        let Some(action) = feature.actions().get(position) else {
            return Ok(None);
        };

        debug!(
            "semantic: best action of {} is {} ({:.3})",
            feature.name(),
            action.name(),
            score
        );
        if score >= self.config.action_threshold {
            Ok(Some(IntentDecision::action(
                feature,
                action.name(),
                score,
                ResolutionStage::SemanticAction,
            )))
        } else {
            Ok(None)
        }
    }

    fn route_feature(&self, transcript: &str, query: &Vector) -> Result<IntentDecision> {
        let mut best: Option<(&Feature, f32)> = None;
        for (feature, embeddings) in self.catalog.features().iter().zip(&self.index.features) {
            let Some(score) = query.mean_cosine_similarity(&embeddings.keywords)? else {
                continue;
            };
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((feature, score));
            }
        }

        let Some((feature, score)) = best else {
            return Ok(IntentDecision::unknown(0.0, ResolutionStage::Semantic));
        };
        debug!("semantic: best feature is {} ({:.3})", feature.name(), score);

        if score >= self.config.fallback_threshold {
            return Ok(IntentDecision::query(
                feature,
                transcript,
                score,
                ResolutionStage::Semantic,
            ));
        }

        match self.catalog.feature(&self.config.default_feature) {
            Some(default) => {
                warn!(
                    "low routing confidence ({:.3} < {}), falling back to {}",
                    score,
                    self.config.fallback_threshold,
                    default.name()
                );
                Ok(IntentDecision::fallback(default, transcript, score))
            }
            None => {
                warn!(
                    "low routing confidence ({:.3}) and default feature '{}' is not in the catalog",
                    score, self.config.default_feature
                );
                Ok(IntentDecision::unknown(score, ResolutionStage::Semantic))
            }
        }
    }
}
