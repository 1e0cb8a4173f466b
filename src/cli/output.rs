//! Output formatting for CLI commands.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, DroppedPhrase};
use crate::cli::args::{OutputFormat, SignpostArgs};
use crate::error::Result;
use crate::router::IntentDecision;

/// One line of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchLineResult {
    /// 1-based line number in the requests file.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<IntentDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Catalog overview entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub name: String,
    pub keywords: Vec<String>,
    pub actions: Vec<ActionSummary>,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSummary {
    pub name: String,
    pub phrases: Vec<String>,
}

impl FeatureSummary {
    pub fn from_catalog(catalog: &Catalog) -> Vec<FeatureSummary> {
        catalog
            .features()
            .iter()
            .map(|feature| FeatureSummary {
                name: feature.name().to_string(),
                keywords: feature.keywords().iter().map(|k| k.to_string()).collect(),
                actions: feature
                    .actions()
                    .iter()
                    .map(|action| ActionSummary {
                        name: action.name().to_string(),
                        phrases: action.phrases().iter().map(|p| p.to_string()).collect(),
                    })
                    .collect(),
                aliases: feature.aliases().iter().map(|a| a.to_string()).collect(),
            })
            .collect()
    }
}

/// Result of the `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub features: usize,
    pub dropped: Vec<DroppedPhrase>,
    pub config_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_error: Option<String>,
    pub default_feature: String,
    pub default_feature_present: bool,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.config_valid && self.default_feature_present
    }
}

/// Print a single routing decision.
pub fn output_decision(decision: &IntentDecision, args: &SignpostArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print!("{}", render_decision_human(decision)),
        OutputFormat::Json => output_json(decision, args)?,
    }
    Ok(())
}

/// Print batch results, one per line.
pub fn output_batch(results: &[BatchLineResult], args: &SignpostArgs) -> Result<()> {
    for result in results {
        match args.output_format {
            OutputFormat::Human => println!("{}", render_batch_line_human(result)),
            OutputFormat::Json => output_json(result, args)?,
        }
    }
    Ok(())
}

/// Print the catalog overview.
pub fn output_catalog(
    features: &[FeatureSummary],
    show_phrases: bool,
    args: &SignpostArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print!("{}", render_catalog_human(features, show_phrases)),
        OutputFormat::Json => output_json(&features, args)?,
    }
    Ok(())
}

/// Print a check report.
pub fn output_check(report: &CheckReport, args: &SignpostArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print!("{}", render_check_human(report)),
        OutputFormat::Json => output_json(report, args)?,
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize + ?Sized>(result: &T, args: &SignpostArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Multi-line human form of a decision.
pub fn render_decision_human(decision: &IntentDecision) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "intent:     {}", decision.intent());
    let _ = writeln!(out, "target:     {}", decision.target().unwrap_or("-"));
    let _ = writeln!(out, "command:    {}", decision.command());
    let _ = writeln!(out, "confidence: {:.3}", decision.confidence());
    if let Some(query) = decision.query_text() {
        let _ = writeln!(out, "query:      {query}");
    }
    if decision.is_fallback() {
        let _ = writeln!(out, "fallback:   yes");
    }
    let _ = writeln!(out, "stage:      {}", decision.stage());
    out
}

/// One-line human form of a batch result.
pub fn render_batch_line_human(result: &BatchLineResult) -> String {
    match (&result.decision, &result.error) {
        (Some(decision), _) => {
            let mut line = format!(
                "{:>4}: {} -> {} [{}] ({:.3}, {})",
                result.line,
                decision.intent(),
                decision.target().unwrap_or("-"),
                decision.command(),
                decision.confidence(),
                decision.stage()
            );
            if decision.is_fallback() {
                line.push_str(" fallback");
            }
            line
        }
        (None, Some(error)) => format!("{:>4}: error: {}", result.line, error),
        (None, None) => format!("{:>4}: no result", result.line),
    }
}

/// Human form of the catalog overview.
pub fn render_catalog_human(features: &[FeatureSummary], show_phrases: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Features ({}):", features.len());
    for feature in features {
        if show_phrases {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", feature.name);
            let _ = writeln!(out, "  keywords: {}", feature.keywords.join(", "));
            for action in &feature.actions {
                let _ = writeln!(out, "  action {}: {}", action.name, action.phrases.join(", "));
            }
            let _ = writeln!(out, "  aliases:  {}", feature.aliases.join(", "));
        } else {
            let _ = writeln!(
                out,
                "  {:<12} {:>3} keywords  {:>2} actions  {:>2} aliases",
                feature.name,
                feature.keywords.len(),
                feature.actions.len(),
                feature.aliases.len()
            );
        }
    }
    out
}

/// Human form of a check report.
pub fn render_check_human(report: &CheckReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Features: {}", report.features);

    if report.dropped.is_empty() {
        let _ = writeln!(out, "Dropped phrases: none");
    } else {
        let _ = writeln!(out, "Dropped phrases ({}):", report.dropped.len());
        for dropped in &report.dropped {
            let _ = writeln!(
                out,
                "  {} {} '{}' (owned by {})",
                dropped.feature,
                dropped.kind.as_str(),
                dropped.phrase,
                dropped.owner
            );
        }
    }

    match &report.config_error {
        Some(error) => {
            let _ = writeln!(out, "Config: invalid ({error})");
        }
        None => {
            let _ = writeln!(out, "Config: ok");
        }
    }
    let _ = writeln!(
        out,
        "Default feature '{}': {}",
        report.default_feature,
        if report.default_feature_present {
            "present"
        } else {
            "missing"
        }
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FeatureDefinition, PhraseKind};
    use crate::router::decision::ResolutionStage;

    fn catalog() -> Catalog {
        Catalog::build(vec![
            FeatureDefinition::new("Music")
                .keywords(["song"])
                .action("Play", ["play", "resume"])
                .aliases(["music", "song"]),
            FeatureDefinition::new("Chatbot").keywords(["chat"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_decision_human() {
        let catalog = catalog();
        let music = catalog.feature("Music").unwrap();
        let decision = IntentDecision::navigate(music, 0.95, ResolutionStage::Trigger);

        let text = render_decision_human(&decision);
        assert!(text.contains("intent:     navigate"));
        assert!(text.contains("target:     Music"));
        assert!(text.contains("confidence: 0.950"));
        assert!(text.contains("stage:      trigger"));
        assert!(!text.contains("query:"));
    }

    #[test]
    fn test_render_batch_lines() {
        let catalog = catalog();
        let chatbot = catalog.feature("Chatbot").unwrap();
        let ok = BatchLineResult {
            line: 3,
            decision: Some(IntentDecision::fallback(chatbot, "hello there", 0.0)),
            error: None,
        };
        assert_eq!(
            render_batch_line_human(&ok),
            "   3: query -> Chatbot [Chatbot] (0.000, semantic) fallback"
        );

        let failed = BatchLineResult {
            line: 4,
            decision: None,
            error: Some("JSON error: EOF".to_string()),
        };
        assert_eq!(render_batch_line_human(&failed), "   4: error: JSON error: EOF");
    }

    #[test]
    fn test_batch_line_json_omits_empty_fields() {
        let failed = BatchLineResult {
            line: 1,
            decision: None,
            error: Some("bad".to_string()),
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value, serde_json::json!({"line": 1, "error": "bad"}));
    }

    #[test]
    fn test_render_catalog_human() {
        let features = FeatureSummary::from_catalog(&catalog());
        assert_eq!(features[0].aliases, vec!["music", "song"]);
        assert_eq!(features[1].aliases, vec!["chatbot"]);

        let text = render_catalog_human(&features, false);
        assert!(text.starts_with("Features (2):"));
        assert!(text.contains("Music"));

        let text = render_catalog_human(&features, true);
        assert!(text.contains("  action Play: play, resume"));
    }

    #[test]
    fn test_render_check_human() {
        let report = CheckReport {
            features: 2,
            dropped: vec![DroppedPhrase {
                feature: "Product".to_string(),
                phrase: "item".to_string(),
                kind: PhraseKind::Keyword,
                owner: "Object".to_string(),
            }],
            config_valid: true,
            config_error: None,
            default_feature: "Chatbot".to_string(),
            default_feature_present: true,
        };
        assert!(report.is_ok());

        let text = render_check_human(&report);
        assert!(text.contains("Product keyword 'item' (owned by Object)"));
        assert!(text.contains("Config: ok"));
        assert!(text.contains("Default feature 'Chatbot': present"));
    }
}
