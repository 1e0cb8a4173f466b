//! Catalog construction and lookup.
//!
//! # Deduplication
//!
//! Definitions are processed in the order given. Every phrase is normalized
//! before it is registered, and:
//!
//! - feature names are reserved for their own feature before any keyword or
//!   alias is registered, so no feature can claim another feature's name;
//! - keywords and action phrases share one table: each phrase belongs to
//!   exactly one feature or one feature's action, and later claims are
//!   dropped;
//! - aliases form a separate navigation table; an alias belongs to at most
//!   one feature and later claims are dropped.
//!
//! Every dropped phrase is recorded and can be inspected with
//! [`Catalog::dropped_phrases`].

use std::path::Path;

use ahash::{AHashMap, AHashSet};
use log::{debug, info};
use serde::Serialize;

use crate::analysis::normalizer::{NormalizedText, TranscriptNormalizer};
use crate::catalog::builtin::builtin_definitions;
use crate::catalog::definition::{FeatureDefinition, load_definitions};
use crate::catalog::feature::{Action, Feature, FeatureId};
use crate::error::{Result, SignpostError};

/// Which phrase table a dropped phrase was headed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseKind {
    Keyword,
    Alias,
    ActionPhrase,
}

impl PhraseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhraseKind::Keyword => "keyword",
            PhraseKind::Alias => "alias",
            PhraseKind::ActionPhrase => "action phrase",
        }
    }
}

/// A phrase that was discarded while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedPhrase {
    /// Feature whose definition contained the phrase.
    pub feature: String,
    /// The normalized phrase.
    pub phrase: String,
    pub kind: PhraseKind,
    /// Feature (or `feature/action`) that already owns the phrase.
    pub owner: String,
}

/// Holder of a keyword or action phrase while the catalog is built.
struct PhraseOwner {
    feature: FeatureId,
    action: Option<usize>,
    /// `feature` or `feature/action`, as reported in [`DroppedPhrase::owner`].
    label: String,
}

impl PhraseOwner {
    fn is(&self, feature: FeatureId, action: Option<usize>) -> bool {
        self.feature == feature && self.action == action
    }
}

/// Immutable registry of features.
#[derive(Debug)]
pub struct Catalog {
    features: Vec<Feature>,
    by_name: AHashMap<String, FeatureId>,
    dropped: Vec<DroppedPhrase>,
    normalizer: TranscriptNormalizer,
}

impl Catalog {
    /// Build a catalog from definitions, in the given order.
    ///
    /// # Errors
    ///
    /// Returns a catalog error when a feature or action name is blank, or
    /// when two features (or two actions of one feature) share a name.
    pub fn build(definitions: Vec<FeatureDefinition>) -> Result<Self> {
        let normalizer = TranscriptNormalizer::new()?;

        let mut by_name: AHashMap<String, FeatureId> = AHashMap::new();
        let mut phrase_owner: AHashMap<String, PhraseOwner> = AHashMap::new();
        let mut alias_owner: AHashMap<String, FeatureId> = AHashMap::new();

        // Names first, so every later phrase table sees all reservations.
        let mut names = Vec::with_capacity(definitions.len());
        let display_names: Vec<String> = definitions
            .iter()
            .map(|d| d.name.trim().to_string())
            .collect();
        for (index, definition) in definitions.iter().enumerate() {
            let id = FeatureId(index);
            let normalized = normalizer.normalize(&definition.name);
            if normalized.is_empty() {
                return Err(SignpostError::catalog(format!(
                    "feature #{index} has a blank name"
                )));
            }
            if let Some(existing) = by_name.get(normalized.as_str()) {
                return Err(SignpostError::catalog(format!(
                    "duplicate feature name '{}' (already defined as #{})",
                    definition.name,
                    existing.index()
                )));
            }
            by_name.insert(normalized.as_str().to_string(), id);
            phrase_owner.insert(
                normalized.as_str().to_string(),
                PhraseOwner {
                    feature: id,
                    action: None,
                    label: display_names[index].clone(),
                },
            );
            alias_owner.insert(normalized.as_str().to_string(), id);
            names.push(normalized);
        }

        let mut dropped = Vec::new();
        let mut features = Vec::with_capacity(definitions.len());

        for (index, (definition, normalized_name)) in
            definitions.into_iter().zip(names).enumerate()
        {
            let id = FeatureId(index);
            let feature_name = display_names[index].clone();

            let mut keywords = Vec::new();
            let mut seen = AHashSet::new();
            for raw in &definition.keywords {
                let phrase = normalizer.normalize(raw);
                if phrase.is_empty() || !seen.insert(phrase.clone()) {
                    continue;
                }
                let owner = phrase_owner
                    .entry(phrase.as_str().to_string())
                    .or_insert_with(|| PhraseOwner {
                        feature: id,
                        action: None,
                        label: feature_name.clone(),
                    });
                if owner.is(id, None) {
                    keywords.push(phrase);
                } else {
                    debug!(
                        "dropping keyword '{}' from {}: owned by {}",
                        phrase, feature_name, owner.label
                    );
                    dropped.push(DroppedPhrase {
                        feature: feature_name.clone(),
                        phrase: phrase.into_string(),
                        kind: PhraseKind::Keyword,
                        owner: owner.label.clone(),
                    });
                }
            }

            let mut aliases = Vec::new();
            let mut seen = AHashSet::new();
            for raw in &definition.aliases {
                let alias = normalizer.normalize(raw);
                if alias.is_empty() || !seen.insert(alias.clone()) {
                    continue;
                }
                let owner = *alias_owner.entry(alias.as_str().to_string()).or_insert(id);
                if owner == id {
                    aliases.push(alias);
                } else {
                    let owner_name = display_names[owner.index()].clone();
                    debug!(
                        "dropping alias '{}' from {}: owned by {}",
                        alias, feature_name, owner_name
                    );
                    dropped.push(DroppedPhrase {
                        feature: feature_name.clone(),
                        phrase: alias.into_string(),
                        kind: PhraseKind::Alias,
                        owner: owner_name,
                    });
                }
            }
            if !seen.contains(&normalized_name) {
                aliases.push(normalized_name.clone());
            }

            let mut actions: Vec<Action> = Vec::with_capacity(definition.actions.len());
            for action_def in &definition.actions {
                let action_name = action_def.name.trim().to_string();
                if action_name.is_empty() {
                    return Err(SignpostError::catalog(format!(
                        "feature '{feature_name}' has an action with a blank name"
                    )));
                }
                if actions
                    .iter()
                    .any(|a| a.name.eq_ignore_ascii_case(&action_name))
                {
                    return Err(SignpostError::catalog(format!(
                        "feature '{feature_name}' defines action '{action_name}' twice"
                    )));
                }

                let action_index = actions.len();
                let mut phrases = Vec::new();
                for raw in &action_def.phrases {
                    let phrase = normalizer.normalize(raw);
                    if phrase.is_empty() {
                        continue;
                    }
                    let owner = phrase_owner
                        .entry(phrase.as_str().to_string())
                        .or_insert_with(|| PhraseOwner {
                            feature: id,
                            action: Some(action_index),
                            label: format!("{feature_name}/{action_name}"),
                        });
                    if owner.is(id, Some(action_index)) {
                        if !phrases.contains(&phrase) {
                            phrases.push(phrase);
                        }
                    } else {
                        debug!(
                            "dropping action phrase '{}' from {}/{}: owned by {}",
                            phrase, feature_name, action_name, owner.label
                        );
                        dropped.push(DroppedPhrase {
                            feature: feature_name.clone(),
                            phrase: phrase.into_string(),
                            kind: PhraseKind::ActionPhrase,
                            owner: owner.label.clone(),
                        });
                    }
                }
                actions.push(Action {
                    name: action_name,
                    phrases,
                });
            }

            features.push(Feature {
                id,
                name: feature_name,
                normalized_name,
                keywords,
                actions,
                aliases,
            });
        }

        info!(
            "built catalog with {} features ({} duplicate phrases dropped)",
            features.len(),
            dropped.len()
        );

        Ok(Self {
            features,
            by_name,
            dropped,
            normalizer,
        })
    }

    /// The default assistant catalog.
    pub fn builtin() -> Result<Self> {
        Self::build(builtin_definitions())
    }

    /// Build a catalog from a JSON definitions file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(load_definitions(path)?)
    }

    /// Features in definition order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Feature by id.
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.index())
    }

    /// Feature by name, ignoring case, punctuation and extra whitespace.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        let normalized = self.normalizer.normalize(name);
        self.by_name
            .get(normalized.as_str())
            .and_then(|id| self.get(*id))
    }

    pub fn keywords_of(&self, name: &str) -> Option<&[NormalizedText]> {
        self.feature(name).map(Feature::keywords)
    }

    pub fn actions_of(&self, name: &str) -> Option<&[Action]> {
        self.feature(name).map(Feature::actions)
    }

    pub fn aliases_of(&self, name: &str) -> Option<&[NormalizedText]> {
        self.feature(name).map(Feature::aliases)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Phrases discarded as duplicates during construction.
    pub fn dropped_phrases(&self) -> &[DroppedPhrase] {
        &self.dropped
    }

    /// The normalizer used for every catalog phrase.
    ///
    /// Transcripts must go through the same normalizer before matching.
    pub fn normalizer(&self) -> &TranscriptNormalizer {
        &self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(list: &[NormalizedText]) -> Vec<&str> {
        list.iter().map(|p| p.as_str()).collect()
    }

    #[test]
    fn test_build_preserves_order_and_normalizes() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Text").keywords(["Document", "  Read  Aloud "]),
            FeatureDefinition::new("Currency").keywords(["money!"]),
        ])
        .unwrap();

        let names: Vec<&str> = catalog.features().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Text", "Currency"]);
        assert_eq!(
            phrases(catalog.keywords_of("text").unwrap()),
            vec!["document", "read aloud"]
        );
        assert_eq!(phrases(catalog.keywords_of("Currency").unwrap()), vec!["money"]);
    }

    #[test]
    fn test_earlier_feature_keeps_shared_keyword() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Object").keywords(["item", "thing"]),
            FeatureDefinition::new("Product").keywords(["product", "item"]),
        ])
        .unwrap();

        assert_eq!(phrases(catalog.keywords_of("Object").unwrap()), vec!["item", "thing"]);
        assert_eq!(phrases(catalog.keywords_of("Product").unwrap()), vec!["product"]);

        let dropped = catalog.dropped_phrases();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].feature, "Product");
        assert_eq!(dropped[0].phrase, "item");
        assert_eq!(dropped[0].kind, PhraseKind::Keyword);
        assert_eq!(dropped[0].owner, "Object");
    }

    #[test]
    fn test_feature_names_are_reserved() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Text").keywords(["music", "page"]),
            FeatureDefinition::new("Music").keywords(["music", "song"]),
        ])
        .unwrap();

        assert_eq!(phrases(catalog.keywords_of("Text").unwrap()), vec!["page"]);
        assert_eq!(phrases(catalog.keywords_of("Music").unwrap()), vec!["music", "song"]);
        assert_eq!(catalog.dropped_phrases()[0].owner, "Music");
    }

    #[test]
    fn test_name_is_always_an_alias() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Chatbot").aliases(["chat", "assistant"]),
            FeatureDefinition::new("Help"),
        ])
        .unwrap();

        assert_eq!(
            phrases(catalog.aliases_of("Chatbot").unwrap()),
            vec!["chat", "assistant", "chatbot"]
        );
        assert_eq!(phrases(catalog.aliases_of("Help").unwrap()), vec!["help"]);
    }

    #[test]
    fn test_duplicate_alias_dropped() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Capture").aliases(["camera", "photo"]),
            FeatureDefinition::new("Object").aliases(["photo", "thing"]),
        ])
        .unwrap();

        assert_eq!(
            phrases(catalog.aliases_of("Object").unwrap()),
            vec!["thing", "object"]
        );
        assert!(
            catalog
                .dropped_phrases()
                .iter()
                .any(|d| d.kind == PhraseKind::Alias && d.phrase == "photo")
        );
    }

    #[test]
    fn test_action_phrases_share_the_keyword_table() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Currency")
                .keywords(["price"])
                .action("Identify", ["identify", "value"]),
            FeatureDefinition::new("Music")
                .action("play", ["play", "start"])
                .action("pause", ["pause", "stop", "start"]),
            FeatureDefinition::new("Product")
                .keywords(["play"])
                .action("Identify", ["identify", "scan"])
                .action("Price", ["price", "cost"]),
        ])
        .unwrap();

        let music = catalog.feature("Music").unwrap();
        assert_eq!(phrases(music.actions()[0].phrases()), vec!["play", "start"]);
        assert_eq!(phrases(music.actions()[1].phrases()), vec!["pause", "stop"]);

        let product = catalog.feature("Product").unwrap();
        assert!(product.keywords().is_empty());
        assert_eq!(phrases(product.actions()[0].phrases()), vec!["scan"]);
        assert_eq!(phrases(product.actions()[1].phrases()), vec!["cost"]);

        let dropped: Vec<(&str, &str, PhraseKind, &str)> = catalog
            .dropped_phrases()
            .iter()
            .map(|d| (d.feature.as_str(), d.phrase.as_str(), d.kind, d.owner.as_str()))
            .collect();
        assert_eq!(
            dropped,
            vec![
                ("Music", "start", PhraseKind::ActionPhrase, "Music/play"),
                ("Product", "play", PhraseKind::Keyword, "Music/play"),
                ("Product", "identify", PhraseKind::ActionPhrase, "Currency/Identify"),
                ("Product", "price", PhraseKind::ActionPhrase, "Currency"),
            ]
        );
    }

    #[test]
    fn test_action_phrase_cannot_take_a_feature_name() {
        let catalog = Catalog::build(vec![
            FeatureDefinition::new("Capture").action("Shoot", ["capture", "snap"]),
        ])
        .unwrap();

        let capture = catalog.feature("Capture").unwrap();
        assert_eq!(phrases(capture.actions()[0].phrases()), vec!["snap"]);
        assert_eq!(catalog.dropped_phrases()[0].owner, "Capture");
    }

    #[test]
    fn test_duplicate_feature_name_is_error() {
        let result = Catalog::build(vec![
            FeatureDefinition::new("News"),
            FeatureDefinition::new(" news "),
        ]);
        assert!(matches!(result, Err(SignpostError::Catalog(_))));
    }

    #[test]
    fn test_blank_names_are_errors() {
        assert!(Catalog::build(vec![FeatureDefinition::new("  ")]).is_err());
        assert!(
            Catalog::build(vec![FeatureDefinition::new("Music").action(" ", ["play"])]).is_err()
        );
        assert!(
            Catalog::build(vec![
                FeatureDefinition::new("Music")
                    .action("play", ["play"])
                    .action("Play", ["resume"])
            ])
            .is_err()
        );
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::build(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.feature("Music").is_none());
    }

    #[test]
    fn test_feature_lookup_is_case_insensitive() {
        let catalog = Catalog::build(vec![FeatureDefinition::new("Currency")]).unwrap();
        assert_eq!(catalog.feature("CURRENCY").unwrap().name(), "Currency");
        assert_eq!(catalog.feature(" currency ").unwrap().id().index(), 0);
        assert!(catalog.feature("Money").is_none());
        assert!(catalog.actions_of("Money").is_none());
    }

    #[test]
    fn test_builtin_phrases_have_one_owner() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.dropped_phrases().is_empty());

        let mut owners: AHashMap<&str, (FeatureId, Option<&str>)> = AHashMap::new();
        for feature in catalog.features() {
            for keyword in feature.keywords() {
                let owner = *owners
                    .entry(keyword.as_str())
                    .or_insert((feature.id(), None));
                assert_eq!(owner, (feature.id(), None), "keyword '{keyword}'");
            }
            for action in feature.actions() {
                for phrase in action.phrases() {
                    let owner = *owners
                        .entry(phrase.as_str())
                        .or_insert((feature.id(), Some(action.name())));
                    assert_eq!(
                        owner,
                        (feature.id(), Some(action.name())),
                        "action phrase '{phrase}'"
                    );
                }
            }
        }

        let mut seen = AHashSet::new();
        for feature in catalog.features() {
            for alias in feature.aliases() {
                assert!(seen.insert(alias.as_str()), "alias '{alias}'");
            }
        }
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"name": "Music", "keywords": ["song"], "actions": [{"name": "play", "phrases": ["play"]}]}]"#,
        )
        .unwrap();

        let catalog = Catalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.feature("music").unwrap().action("PLAY").unwrap().name(), "play");
    }
}
