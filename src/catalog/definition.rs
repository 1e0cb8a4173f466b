//! Raw, serializable feature definitions.
//!
//! Definitions are the configuration surface of the catalog. A JSON catalog
//! file is an array so that feature order, which decides who keeps a phrase
//! claimed twice, is explicit:
//!
//! ```json
//! [
//!   {
//!     "name": "Music",
//!     "keywords": ["music", "song"],
//!     "actions": [{ "name": "play", "phrases": ["play", "resume"] }],
//!     "aliases": ["music", "song"]
//!   }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One named action scoped to a feature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Action name reported as the decision's `command`.
    pub name: String,
    /// Phrases that trigger the action while its feature is active.
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// One feature as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureDefinition {
    /// Unique feature name, e.g. `"Currency"`.
    pub name: String,
    /// Keyword phrases, in match order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Actions, in match order.
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
    /// Alternate names usable after a trigger phrase or on their own.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FeatureDefinition {
    /// Start a definition for the named feature.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the keyword phrases.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Append an action with its phrases.
    pub fn action<N, I, S>(mut self, name: N, phrases: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.push(ActionDefinition {
            name: name.into(),
            phrases: phrases.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Set the navigation aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// Load feature definitions from a JSON file.
pub fn load_definitions<P: AsRef<Path>>(path: P) -> Result<Vec<FeatureDefinition>> {
    let content = std::fs::read_to_string(path)?;
    let definitions: Vec<FeatureDefinition> = serde_json::from_str(&content)?;
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let def = FeatureDefinition::new("Music")
            .keywords(["music", "song"])
            .action("play", ["play", "resume"])
            .action("pause", ["pause"])
            .aliases(["music"]);

        assert_eq!(def.name, "Music");
        assert_eq!(def.keywords, vec!["music", "song"]);
        assert_eq!(def.actions.len(), 2);
        assert_eq!(def.actions[0].name, "play");
        assert_eq!(def.actions[1].phrases, vec!["pause"]);
        assert_eq!(def.aliases, vec!["music"]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"[{"name": "Help"}, {"name": "News", "keywords": ["news"]}]"#;
        let defs: Vec<FeatureDefinition> = serde_json::from_str(json).unwrap();
        assert_eq!(defs.len(), 2);
        assert!(defs[0].keywords.is_empty());
        assert!(defs[0].actions.is_empty());
        assert_eq!(defs[1].keywords, vec!["news"]);
    }

    #[test]
    fn test_load_definitions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let defs = vec![FeatureDefinition::new("Text").keywords(["page"])];
        std::fs::write(&path, serde_json::to_string(&defs).unwrap()).unwrap();

        let loaded = load_definitions(&path).unwrap();
        assert_eq!(loaded, defs);
    }

    #[test]
    fn test_load_definitions_missing_file() {
        assert!(load_definitions("/nonexistent/catalog.json").is_err());
    }
}
