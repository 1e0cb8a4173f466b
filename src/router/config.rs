//! Router configuration.
//!
//! Every field has a default, so a configuration file only needs to list
//! what it overrides:
//!
//! ```json
//! { "fallback_threshold": 0.2, "default_feature": "Help" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TranscriptNormalizer;
use crate::error::{Result, SignpostError};

/// A whole-transcript command bound to the active feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralAction {
    /// Phrase the normalized transcript must equal.
    pub phrase: String,
    /// Command reported in the decision.
    pub command: String,
}

impl LiteralAction {
    pub fn new<P: Into<String>, C: Into<String>>(phrase: P, command: C) -> Self {
        Self {
            phrase: phrase.into(),
            command: command.into(),
        }
    }
}

/// Tunable routing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Navigation prefixes, tried in order.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,

    /// Literal commands checked first while a feature is active.
    #[serde(default = "default_literal_actions")]
    pub literal_actions: Vec<LiteralAction>,

    /// Minimum mean similarity for a semantic action match (inclusive).
    #[serde(default = "default_action_threshold")]
    pub action_threshold: f32,

    /// Below this best feature score, route to `default_feature`.
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f32,

    /// Feature that receives low-confidence queries.
    #[serde(default = "default_feature")]
    pub default_feature: String,
}

fn default_triggers() -> Vec<String> {
    [
        "switch to",
        "go to",
        "open",
        "activate",
        "change to",
        "navigate to",
        "show me",
        "i want to use",
        "let's use",
        "start",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_literal_actions() -> Vec<LiteralAction> {
    vec![
        LiteralAction::new("stop", "Stop"),
        LiteralAction::new("play", "Play"),
    ]
}

fn default_action_threshold() -> f32 {
    0.6
}

fn default_fallback_threshold() -> f32 {
    0.1
}

fn default_feature() -> String {
    "Chatbot".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            triggers: default_triggers(),
            literal_actions: default_literal_actions(),
            action_threshold: default_action_threshold(),
            fallback_threshold: default_fallback_threshold(),
            default_feature: default_feature(),
        }
    }
}

impl RouterConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: RouterConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds and phrase tables.
    pub fn validate(&self) -> Result<()> {
        if !self.action_threshold.is_finite() {
            return Err(SignpostError::config("action_threshold must be finite"));
        }
        if !(-1.0..=1.0).contains(&self.action_threshold) {
            return Err(SignpostError::config(format!(
                "action_threshold must be within [-1, 1], got {}",
                self.action_threshold
            )));
        }
        if !self.fallback_threshold.is_finite() {
            return Err(SignpostError::config("fallback_threshold must be finite"));
        }
        if self.default_feature.trim().is_empty() {
            return Err(SignpostError::config("default_feature cannot be empty"));
        }

        let normalizer = TranscriptNormalizer::new()?;
        for trigger in &self.triggers {
            if normalizer.normalize(trigger).is_empty() {
                return Err(SignpostError::config(format!(
                    "trigger phrase '{trigger}' is empty after normalization"
                )));
            }
        }
        for literal in &self.literal_actions {
            if normalizer.normalize(&literal.phrase).is_empty() {
                return Err(SignpostError::config(format!(
                    "literal action phrase '{}' is empty after normalization",
                    literal.phrase
                )));
            }
            if literal.command.trim().is_empty() {
                return Err(SignpostError::config(format!(
                    "literal action '{}' has an empty command",
                    literal.phrase
                )));
            }
        }

        Ok(())
    }
}
