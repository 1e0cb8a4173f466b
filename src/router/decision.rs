//! The routing decision record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Feature;

/// Confidence of a transcript that names a feature outright.
pub const NAME_MATCH_CONFIDENCE: f32 = 1.0;
/// Confidence of a literal in-feature command such as "stop".
pub const LITERAL_ACTION_CONFIDENCE: f32 = 0.99;
/// Confidence of "switch to X" style navigation.
pub const TRIGGER_CONFIDENCE: f32 = 0.95;
/// Confidence of a feature keyword found in the transcript.
pub const KEYWORD_CONFIDENCE: f32 = 0.9;
/// Confidence of an action phrase found in the transcript.
pub const ACTION_PHRASE_CONFIDENCE: f32 = 0.85;
/// Confidence of a transcript that is nothing but a feature alias.
pub const BARE_ALIAS_CONFIDENCE: f32 = 0.75;

/// What the user wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Switch the UI to another feature.
    Navigate,
    /// Hand the utterance to a feature as a free-form request.
    Query,
    /// Run an operation of the (active) feature.
    Action,
    /// Nothing could be decided.
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Navigate => "navigate",
            Intent::Query => "query",
            Intent::Action => "action",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which resolution step produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    /// Nothing left after normalization.
    Empty,
    /// Trigger phrase followed by an alias.
    Trigger,
    /// Whole transcript equal to an alias.
    Alias,
    /// Literal command bound to the active feature.
    Literal,
    /// Action phrase of the active feature.
    ActiveAction,
    /// Feature name or keyword.
    Keyword,
    /// Catalog-wide phrase scan including action phrases.
    DirectPhrase,
    /// Embedding similarity against the active feature's actions.
    SemanticAction,
    /// Embedding similarity against feature keywords.
    Semantic,
}

impl ResolutionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStage::Empty => "empty",
            ResolutionStage::Trigger => "trigger",
            ResolutionStage::Alias => "alias",
            ResolutionStage::Literal => "literal",
            ResolutionStage::ActiveAction => "active_action",
            ResolutionStage::Keyword => "keyword",
            ResolutionStage::DirectPhrase => "direct_phrase",
            ResolutionStage::SemanticAction => "semantic_action",
            ResolutionStage::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of routing one transcript.
///
/// Decisions are built whole by the constructors below and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDecision {
    intent: Intent,
    target: Option<String>,
    command: String,
    confidence: f32,
    query: Option<String>,
    routing_fallback: bool,
    stage: ResolutionStage,
}

impl IntentDecision {
    /// Navigate to `feature`.
    pub fn navigate(feature: &Feature, confidence: f32, stage: ResolutionStage) -> Self {
        Self {
            intent: Intent::Navigate,
            target: Some(feature.name().to_string()),
            command: feature.name().to_string(),
            confidence,
            query: None,
            routing_fallback: false,
            stage,
        }
    }

    /// Run `action` within `feature`.
    pub fn action(
        feature: &Feature,
        action: &str,
        confidence: f32,
        stage: ResolutionStage,
    ) -> Self {
        Self {
            intent: Intent::Action,
            target: Some(feature.name().to_string()),
            command: action.to_string(),
            confidence,
            query: None,
            routing_fallback: false,
            stage,
        }
    }

    /// Hand `transcript` to `feature` as a query.
    pub fn query(
        feature: &Feature,
        transcript: &str,
        confidence: f32,
        stage: ResolutionStage,
    ) -> Self {
        Self {
            intent: Intent::Query,
            target: Some(feature.name().to_string()),
            command: feature.name().to_string(),
            confidence,
            query: Some(transcript.trim().to_string()),
            routing_fallback: false,
            stage,
        }
    }

    /// Low-confidence semantic result sent to the default feature.
    pub fn fallback(feature: &Feature, transcript: &str, confidence: f32) -> Self {
        Self {
            routing_fallback: true,
            ..Self::query(feature, transcript, confidence, ResolutionStage::Semantic)
        }
    }

    /// No feature could be chosen.
    pub fn unknown(confidence: f32, stage: ResolutionStage) -> Self {
        Self {
            intent: Intent::Unknown,
            target: None,
            command: "unknown".to_string(),
            confidence,
            query: None,
            routing_fallback: false,
            stage,
        }
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Name of the feature the decision routes to.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Action name for action decisions, otherwise the target feature name.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// The transcript, for query decisions.
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Whether the semantic stage fell back to the default feature.
    pub fn is_fallback(&self) -> bool {
        self.routing_fallback
    }

    pub fn stage(&self) -> ResolutionStage {
        self.stage
    }
}
