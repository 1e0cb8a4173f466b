//! Explicit navigation commands such as "switch to music".

use crate::analysis::normalizer::{NormalizedText, TranscriptNormalizer};
use crate::catalog::{Catalog, Feature};
use crate::router::decision::{
    BARE_ALIAS_CONFIDENCE, IntentDecision, ResolutionStage, TRIGGER_CONFIDENCE,
};

/// Parses "<trigger> <alias> ..." transcripts and bare aliases.
#[derive(Debug, Clone)]
pub struct TriggerParser {
    triggers: Vec<NormalizedText>,
}

impl TriggerParser {
    /// Normalize `triggers` once, keeping their order. Blank ones are skipped.
    pub fn new<S: AsRef<str>>(triggers: &[S], normalizer: &TranscriptNormalizer) -> Self {
        Self {
            triggers: triggers
                .iter()
                .map(|t| normalizer.normalize(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn triggers(&self) -> &[NormalizedText] {
        &self.triggers
    }

    /// Normalize `transcript` and parse it.
    pub fn parse(&self, catalog: &Catalog, transcript: &str) -> Option<IntentDecision> {
        self.parse_normalized(catalog, &catalog.normalizer().normalize(transcript))
    }

    /// Parse an already normalized transcript.
    ///
    /// A trigger must be followed by a space and then text starting with an
    /// alias; a trigger with nothing routable after it is skipped and the
    /// next trigger is tried. When no trigger
    /// routes, a transcript that is exactly an alias navigates with lower
    /// confidence.
    pub fn parse_normalized(
        &self,
        catalog: &Catalog,
        text: &NormalizedText,
    ) -> Option<IntentDecision> {
        if text.is_empty() {
            return None;
        }

        for trigger in &self.triggers {
            let Some(rest) = text.strip_phrase_prefix(trigger.as_str()) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            if let Some(feature) = Self::feature_at_start(catalog, rest) {
                return Some(IntentDecision::navigate(
                    feature,
                    TRIGGER_CONFIDENCE,
                    ResolutionStage::Trigger,
                ));
            }
        }

        catalog
            .features()
            .iter()
            .find(|f| f.aliases().iter().any(|a| a == text))
            .map(|f| IntentDecision::navigate(f, BARE_ALIAS_CONFIDENCE, ResolutionStage::Alias))
    }

    fn feature_at_start<'c>(catalog: &'c Catalog, rest: &str) -> Option<&'c Feature> {
        catalog.features().iter().find(|feature| {
            feature
                .aliases()
                .iter()
                .any(|alias| rest.starts_with(alias.as_str()))
        })
    }
}
