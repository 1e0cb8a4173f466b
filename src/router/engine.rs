//! Intent resolution: runs each routing stage in precedence order.
//!
//! 0. empty transcript: `unknown`, without calling the embedder
//! 1. trigger phrase followed by an alias, or a bare alias
//! 2. with an active feature: literal commands, then its action phrases
//! 3. feature names and keywords
//! 4. names, keywords and action phrases of every feature
//! 5. semantic routing, which always decides
//!
//! The first stage that produces a decision wins.

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedText;
use crate::catalog::{Catalog, Feature};
use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{Result, SignpostError};
use crate::router::config::RouterConfig;
use crate::router::decision::{IntentDecision, LITERAL_ACTION_CONFIDENCE, ResolutionStage};
use crate::router::keyword::KeywordMatcher;
use crate::router::semantic::{SemanticIndex, SemanticRouter};
use crate::router::trigger::TriggerParser;

/// One routing request, as read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub transcript: String,
    /// Feature currently shown to the user, if any.
    #[serde(default)]
    pub active_feature: Option<String>,
}

impl RouteRequest {
    pub fn new<S: Into<String>>(transcript: S) -> Self {
        Self {
            transcript: transcript.into(),
            active_feature: None,
        }
    }

    pub fn with_active<S: Into<String>>(mut self, feature: S) -> Self {
        self.active_feature = Some(feature.into());
        self
    }
}

#[derive(Debug)]
struct LiteralCommand {
    phrase: NormalizedText,
    command: String,
}

/// Routes transcripts to features.
///
/// Cloning is cheap; clones share the catalog, index and configuration, so
/// an engine can be handed to many concurrent tasks.
#[derive(Clone)]
pub struct IntentEngine {
    catalog: Arc<Catalog>,
    embedder: Arc<dyn TextEmbedder>,
    index: Arc<SemanticIndex>,
    config: Arc<RouterConfig>,
    triggers: Arc<TriggerParser>,
    literals: Arc<Vec<LiteralCommand>>,
}

impl std::fmt::Debug for IntentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentEngine")
            .field("features", &self.catalog.len())
            .field("embedder", &self.embedder.name())
            .field("dimension", &self.index.dimension())
            .field("config", &self.config)
            .finish()
    }
}

impl IntentEngine {
    /// Validate `config` and precompute the semantic index for `catalog`.
    pub async fn new(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn TextEmbedder>,
        config: RouterConfig,
    ) -> Result<Self> {
        config.validate()?;
        let index = SemanticIndex::build(&catalog, embedder.as_ref()).await?;
        Self::with_index(catalog, embedder, Arc::new(index), config)
    }

    /// Assemble an engine around an index built earlier.
    ///
    /// # Errors
    ///
    /// Fails when the index was built from a catalog with different phrase
    /// tables, or for a different embedding dimension.
    pub fn with_index(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn TextEmbedder>,
        index: Arc<SemanticIndex>,
        config: RouterConfig,
    ) -> Result<Self> {
        config.validate()?;
        index.check_layout(&catalog)?;
        if index.dimension() != embedder.dimension() {
            return Err(SignpostError::invalid_argument(format!(
                "semantic index dimension {} does not match embedder dimension {}",
                index.dimension(),
                embedder.dimension()
            )));
        }
        if catalog.feature(&config.default_feature).is_none() {
            warn!(
                "default feature '{}' is not in the catalog; low-confidence transcripts will be unknown",
                config.default_feature
            );
        }

        let normalizer = catalog.normalizer();
        let triggers = TriggerParser::new(&config.triggers, normalizer);
        let literals = config
            .literal_actions
            .iter()
            .map(|literal| LiteralCommand {
                phrase: normalizer.normalize(&literal.phrase),
                command: literal.command.trim().to_string(),
            })
            .collect();

        Ok(Self {
            catalog,
            embedder,
            index,
            config: Arc::new(config),
            triggers: Arc::new(triggers),
            literals: Arc::new(literals),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn index(&self) -> &SemanticIndex {
        &self.index
    }

    /// Decide what `transcript` asks for.
    ///
    /// `active_feature` names the feature on screen; a name not in the
    /// catalog is treated as no active feature.
    ///
    /// # Errors
    ///
    /// Only the semantic stage can fail, and only when the embedder does.
    pub async fn resolve(
        &self,
        transcript: &str,
        active_feature: Option<&str>,
    ) -> Result<IntentDecision> {
        let text = self.catalog.normalizer().normalize(transcript);
        if text.is_empty() {
            debug!("empty transcript");
            return Ok(IntentDecision::unknown(0.0, ResolutionStage::Empty));
        }

        let active = self.active_feature(active_feature);

        if let Some(decision) = self.triggers.parse_normalized(&self.catalog, &text) {
            debug!("'{}' resolved by navigation trigger", text);
            return Ok(decision);
        }

        let matcher = KeywordMatcher::new(&self.catalog);

        if let Some(feature) = active {
            if let Some(decision) = self.match_literal(&text, feature) {
                debug!("'{}' resolved by literal command", text);
                return Ok(decision);
            }
            if let Some(decision) = matcher.match_active_action(&text, feature) {
                debug!("'{}' resolved by action phrase of {}", text, feature.name());
                return Ok(decision);
            }
        }

        if let Some(decision) = matcher.match_global(transcript, &text, active) {
            debug!("'{}' resolved by keyword", text);
            return Ok(decision);
        }

        if let Some(decision) = matcher.match_direct(transcript, &text, active) {
            debug!("'{}' resolved by direct phrase", text);
            return Ok(decision);
        }

        debug!("'{}' falling through to semantic routing", text);
        SemanticRouter::new(&self.catalog, &self.index, self.embedder.as_ref(), &self.config)
            .route(transcript, &text, active)
            .await
    }

    /// Resolve a [`RouteRequest`].
    pub async fn resolve_request(&self, request: &RouteRequest) -> Result<IntentDecision> {
        self.resolve(&request.transcript, request.active_feature.as_deref())
            .await
    }

    /// Resolve many requests concurrently.
    ///
    /// Results are returned in input order; one failing request does not
    /// affect the others.
    pub async fn resolve_batch(&self, requests: &[RouteRequest]) -> Vec<Result<IntentDecision>> {
        join_all(requests.iter().map(|request| self.resolve_request(request))).await
    }

    fn active_feature(&self, name: Option<&str>) -> Option<&Feature> {
        let name = name?;
        if name.trim().is_empty() {
            return None;
        }
        let feature = self.catalog.feature(name);
        if feature.is_none() {
            warn!("unknown active feature '{}', routing without one", name);
        }
        feature
    }

    fn match_literal(&self, text: &NormalizedText, active: &Feature) -> Option<IntentDecision> {
        self.literals
            .iter()
            .find(|literal| &literal.phrase == text)
            .map(|literal| {
                IntentDecision::action(
                    active,
                    &literal.command,
                    LITERAL_ACTION_CONFIDENCE,
                    ResolutionStage::Literal,
                )
            })
    }
}
