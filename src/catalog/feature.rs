//! Built, normalized catalog entries.

use std::fmt;

use serde::Serialize;

use crate::analysis::normalizer::NormalizedText;

/// Position of a feature inside its [`Catalog`](super::Catalog).
///
/// Ids are only meaningful for the catalog that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FeatureId(pub(crate) usize);

impl FeatureId {
    /// Index into [`Catalog::features`](super::Catalog::features).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An action available while its feature is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub(crate) name: String,
    pub(crate) phrases: Vec<NormalizedText>,
}

impl Action {
    /// Action name, used as the decision's `command`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized phrases, in match order.
    pub fn phrases(&self) -> &[NormalizedText] {
        &self.phrases
    }
}

/// A feature with its normalized, deduplicated phrase tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub(crate) id: FeatureId,
    pub(crate) name: String,
    pub(crate) normalized_name: NormalizedText,
    pub(crate) keywords: Vec<NormalizedText>,
    pub(crate) actions: Vec<Action>,
    pub(crate) aliases: Vec<NormalizedText>,
}

impl Feature {
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Canonical name as configured, e.g. `"Currency"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name after normalization, e.g. `"currency"`.
    pub fn normalized_name(&self) -> &NormalizedText {
        &self.normalized_name
    }

    pub fn keywords(&self) -> &[NormalizedText] {
        &self.keywords
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Navigation aliases. Always contains the normalized name.
    pub fn aliases(&self) -> &[NormalizedText] {
        &self.aliases
    }

    /// Look up an action by name, ignoring case.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
    }
}
