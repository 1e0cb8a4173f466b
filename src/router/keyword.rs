//! Exact phrase matching against the catalog.
//!
//! All matching is done on [`NormalizedText`]: a phrase matches when it
//! occurs anywhere in the transcript, so `"song"` also matches `"songs"`.

use crate::analysis::normalizer::NormalizedText;
use crate::catalog::{Catalog, Feature};
use crate::router::decision::{
    ACTION_PHRASE_CONFIDENCE, IntentDecision, KEYWORD_CONFIDENCE, NAME_MATCH_CONFIDENCE,
    ResolutionStage,
};

/// Keyword and action-phrase matcher borrowing a catalog.
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Active-feature action phrases first, then the global name/keyword scan.
    ///
    /// `active` names a feature; unknown names are ignored.
    pub fn match_keyword(&self, transcript: &str, active: Option<&str>) -> Option<IntentDecision> {
        let text = self.catalog.normalizer().normalize(transcript);
        if text.is_empty() {
            return None;
        }
        let active = active.and_then(|name| self.catalog.feature(name));

        if let Some(feature) = active {
            if let Some(decision) = self.match_active_action(&text, feature) {
                return Some(decision);
            }
        }
        self.match_global(transcript, &text, active)
    }

    /// First action phrase of `active` found in `text`, in action order then
    /// phrase order.
    pub fn match_active_action(
        &self,
        text: &NormalizedText,
        active: &Feature,
    ) -> Option<IntentDecision> {
        active
            .actions()
            .iter()
            .find(|action| action.phrases().iter().any(|p| text.contains_phrase(p.as_str())))
            .map(|action| {
                IntentDecision::action(
                    active,
                    action.name(),
                    ACTION_PHRASE_CONFIDENCE,
                    ResolutionStage::ActiveAction,
                )
            })
    }

    /// First feature whose name or one of whose keywords occurs in `text`.
    ///
    /// Hits on the active feature become queries carrying `transcript`; any
    /// other hit navigates.
    pub fn match_global(
        &self,
        transcript: &str,
        text: &NormalizedText,
        active: Option<&Feature>,
    ) -> Option<IntentDecision> {
        self.catalog.features().iter().find_map(|feature| {
            self.match_name_or_keyword(transcript, text, feature, active, ResolutionStage::Keyword)
        })
    }

    /// Catalog-wide scan of names, keywords, then action phrases per feature.
    ///
    /// An action phrase hit is attributed to the feature that owns it,
    /// whether or not that feature is active.
    pub fn match_direct(
        &self,
        transcript: &str,
        text: &NormalizedText,
        active: Option<&Feature>,
    ) -> Option<IntentDecision> {
        for feature in self.catalog.features() {
            if let Some(decision) = self.match_name_or_keyword(
                transcript,
                text,
                feature,
                active,
                ResolutionStage::DirectPhrase,
            ) {
                return Some(decision);
            }

            for action in feature.actions() {
                if action.phrases().iter().any(|p| text.contains_phrase(p.as_str())) {
                    return Some(IntentDecision::action(
                        feature,
                        action.name(),
                        ACTION_PHRASE_CONFIDENCE,
                        ResolutionStage::DirectPhrase,
                    ));
                }
            }
        }
        None
    }

    fn match_name_or_keyword(
        &self,
        transcript: &str,
        text: &NormalizedText,
        feature: &Feature,
        active: Option<&Feature>,
        stage: ResolutionStage,
    ) -> Option<IntentDecision> {
        let confidence = if text.contains_phrase(feature.normalized_name().as_str()) {
            NAME_MATCH_CONFIDENCE
        } else if feature
            .keywords()
            .iter()
            .any(|k| text.contains_phrase(k.as_str()))
        {
            KEYWORD_CONFIDENCE
        } else {
            return None;
        };

        let is_active = active.is_some_and(|a| a.id() == feature.id());
        Some(if is_active {
            IntentDecision::query(feature, transcript, confidence, stage)
        } else {
            IntentDecision::navigate(feature, confidence, stage)
        })
    }
}
