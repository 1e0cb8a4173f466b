mod common;

use std::sync::Arc;

use common::{FailingEmbedder, VocabularyEmbedder};
use signpost::catalog::{Catalog, FeatureDefinition};
use signpost::embedding::{HashingTextEmbedder, TextEmbedder};
use signpost::error::{Result, SignpostError};
use signpost::router::{
    Intent, IntentEngine, KeywordMatcher, ResolutionStage, RouteRequest, RouterConfig,
};

async fn builtin_engine(embedder: Arc<dyn TextEmbedder>) -> Result<IntentEngine> {
    IntentEngine::new(Arc::new(Catalog::builtin()?), embedder, RouterConfig::default()).await
}

#[tokio::test]
async fn play_on_active_music_is_literal_action() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    let decision = engine.resolve("play", Some("Music")).await?;
    assert_eq!(decision.intent(), Intent::Action);
    assert_eq!(decision.target(), Some("Music"));
    assert_eq!(decision.command(), "Play");
    assert_eq!(decision.confidence(), 0.99);
    assert_eq!(decision.query_text(), None);
    Ok(())
}

#[tokio::test]
async fn switch_to_currency_navigates() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    let decision = engine.resolve("switch to currency", None).await?;
    assert_eq!(decision.intent(), Intent::Navigate);
    assert_eq!(decision.target(), Some("Currency"));
    assert_eq!(decision.command(), "Currency");
    assert_eq!(decision.confidence(), 0.95);
    assert_eq!(decision.stage(), ResolutionStage::Trigger);
    Ok(())
}

#[tokio::test]
async fn unrelated_question_falls_back_to_chatbot() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    let decision = engine.resolve("tell me the weather", None).await?;
    assert_eq!(decision.intent(), Intent::Query);
    assert_eq!(decision.target(), Some("Chatbot"));
    assert_eq!(decision.query_text(), Some("tell me the weather"));
    assert!(decision.is_fallback());
    assert!(decision.confidence() < 0.1);
    assert_eq!(decision.stage(), ResolutionStage::Semantic);
    Ok(())
}

#[tokio::test]
async fn word_forms_of_phrases_still_route() -> Result<()> {
    let engine = builtin_engine(Arc::new(FailingEmbedder)).await?;

    for (transcript, target) in [("open photos", "Capture"), ("go to songs", "Music")] {
        let decision = engine.resolve(transcript, None).await?;
        assert_eq!(decision.target(), Some(target), "transcript '{transcript}'");
        assert_eq!(decision.confidence(), 0.95);
        assert_eq!(decision.stage(), ResolutionStage::Trigger);
    }

    for (transcript, target) in [
        ("play my songs", "Music"),
        ("show the documents", "Text"),
        ("counting coins", "Currency"),
    ] {
        let decision = engine.resolve(transcript, None).await?;
        assert_eq!(decision.intent(), Intent::Navigate);
        assert_eq!(decision.target(), Some(target), "transcript '{transcript}'");
        assert_eq!(decision.confidence(), 0.9);
        assert_eq!(decision.stage(), ResolutionStage::Keyword);
    }
    Ok(())
}

#[tokio::test]
async fn every_alias_after_a_trigger_navigates() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    for feature in engine.catalog().features() {
        for alias in feature.aliases() {
            let decision = engine.resolve(&format!("switch to {alias}"), None).await?;
            assert_eq!(decision.intent(), Intent::Navigate, "alias '{alias}'");
            assert_eq!(decision.target(), Some(feature.name()), "alias '{alias}'");
            assert_eq!(decision.confidence(), 0.95);
        }
    }
    Ok(())
}

#[tokio::test]
async fn bare_alias_navigates_with_lower_confidence() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    for feature in engine.catalog().features() {
        for alias in feature.aliases() {
            let decision = engine.resolve(alias.as_str(), None).await?;
            assert_eq!(decision.target(), Some(feature.name()), "alias '{alias}'");
            assert_eq!(decision.confidence(), 0.75);
            assert_eq!(decision.stage(), ResolutionStage::Alias);
        }
    }
    Ok(())
}

#[test]
fn feature_name_matches_with_full_confidence() -> Result<()> {
    let catalog = Catalog::builtin()?;
    let matcher = KeywordMatcher::new(&catalog);

    for feature in catalog.features() {
        let decision = matcher
            .match_keyword(feature.name(), None)
            .expect("feature name should match");
        assert_eq!(decision.intent(), Intent::Navigate);
        assert_eq!(decision.target(), Some(feature.name()));
        assert_eq!(decision.confidence(), 1.0);
    }

    let decision = matcher
        .match_keyword("News", Some("News"))
        .expect("feature name should match");
    assert_eq!(decision.intent(), Intent::Query);
    assert_eq!(decision.confidence(), 1.0);
    Ok(())
}

#[tokio::test]
async fn resolution_is_deterministic() -> Result<()> {
    let engine = builtin_engine(Arc::new(HashingTextEmbedder::new(256)?)).await?;

    for (transcript, active) in [
        ("tell me the weather", None),
        ("how much does this cost", Some("Product")),
        ("read the headlines", None),
        ("pause", Some("Music")),
    ] {
        let first = engine.resolve(transcript, active).await?;
        let second = engine.resolve(transcript, active).await?;
        assert_eq!(first, second, "transcript '{transcript}'");
    }
    Ok(())
}

#[tokio::test]
async fn empty_transcript_is_unknown_without_embedding() -> Result<()> {
    let engine = builtin_engine(Arc::new(FailingEmbedder)).await?;

    for transcript in ["", "   ", "?!."] {
        let decision = engine.resolve(transcript, Some("Music")).await?;
        assert_eq!(decision.intent(), Intent::Unknown);
        assert_eq!(decision.target(), None);
        assert_eq!(decision.confidence(), 0.0);
        assert_eq!(decision.stage(), ResolutionStage::Empty);
    }
    Ok(())
}

#[tokio::test]
async fn literal_stop_uses_configured_command() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    let decision = engine.resolve("Stop!", Some("Music")).await?;
    assert_eq!(decision.intent(), Intent::Action);
    assert_eq!(decision.command(), "Stop");
    assert_eq!(decision.stage(), ResolutionStage::Literal);
    Ok(())
}

#[tokio::test]
async fn unknown_active_feature_is_ignored() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    // No active feature: the literal stage is skipped and the action phrase
    // is attributed to the feature that owns it.
    let decision = engine.resolve("stop", Some("Radio")).await?;
    assert_eq!(decision.intent(), Intent::Action);
    assert_eq!(decision.target(), Some("Music"));
    assert_eq!(decision.command(), "Pause");
    assert_eq!(decision.confidence(), 0.85);
    assert_eq!(decision.stage(), ResolutionStage::DirectPhrase);

    assert_eq!(decision, engine.resolve("stop", None).await?);
    Ok(())
}

#[tokio::test]
async fn keyword_on_active_feature_is_query() -> Result<()> {
    let engine = builtin_engine(Arc::new(VocabularyEmbedder::new())).await?;

    let decision = engine.resolve(" Latest news please ", Some("News")).await?;
    assert_eq!(decision.intent(), Intent::Query);
    assert_eq!(decision.target(), Some("News"));
    assert_eq!(decision.query_text(), Some("Latest news please"));
    assert_eq!(decision.stage(), ResolutionStage::Keyword);

    let decision = engine.resolve("latest news please", Some("Music")).await?;
    assert_eq!(decision.intent(), Intent::Navigate);
    assert_eq!(decision.target(), Some("News"));
    Ok(())
}

#[tokio::test]
async fn semantic_routing_picks_closest_feature() -> Result<()> {
    let catalog = Catalog::build(vec![
        FeatureDefinition::new("Distance").keywords(["how far away", "measure length"]),
        FeatureDefinition::new("Music")
            .keywords(["song"])
            .action("Play", ["resume playback"]),
        FeatureDefinition::new("Chatbot").keywords(["chat"]),
    ])?;
    let engine = IntentEngine::new(
        Arc::new(catalog),
        Arc::new(VocabularyEmbedder::new()),
        RouterConfig::default(),
    )
    .await?;

    let decision = engine.resolve("  Far away door ", None).await?;
    assert_eq!(decision.intent(), Intent::Query);
    assert_eq!(decision.target(), Some("Distance"));
    assert_eq!(decision.query_text(), Some("Far away door"));
    assert!(!decision.is_fallback());
    assert!((decision.confidence() - 1.0 / 3.0).abs() < 1e-4);

    let decision = engine.resolve("playback resume", Some("Music")).await?;
    assert_eq!(decision.intent(), Intent::Action);
    assert_eq!(decision.command(), "Play");
    assert_eq!(decision.stage(), ResolutionStage::SemanticAction);
    Ok(())
}

#[tokio::test]
async fn empty_catalog_routes_everything_to_unknown() -> Result<()> {
    let engine = IntentEngine::new(
        Arc::new(Catalog::build(Vec::new())?),
        Arc::new(VocabularyEmbedder::new()),
        RouterConfig::default(),
    )
    .await?;

    for transcript in ["switch to music", "play", "tell me the weather"] {
        let decision = engine.resolve(transcript, Some("Music")).await?;
        assert_eq!(decision.intent(), Intent::Unknown);
        assert_eq!(decision.target(), None);
    }
    Ok(())
}

#[tokio::test]
async fn embedder_failure_fails_only_semantic_routing() -> Result<()> {
    let engine = builtin_engine(Arc::new(FailingEmbedder)).await?;

    let result = engine.resolve("tell me the weather", None).await;
    assert!(matches!(result, Err(SignpostError::Embedding(_))));

    let decision = engine.resolve("switch to currency", None).await?;
    assert_eq!(decision.target(), Some("Currency"));
    Ok(())
}

#[tokio::test]
async fn batch_results_keep_input_order() -> Result<()> {
    let engine = builtin_engine(Arc::new(FailingEmbedder)).await?;

    let requests = vec![
        RouteRequest::new("switch to currency"),
        RouteRequest::new("tell me the weather"),
        RouteRequest::new("play").with_active("Music"),
    ];
    let results = engine.resolve_batch(&requests).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().target(), Some("Currency"));
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().command(), "Play");
    Ok(())
}

#[tokio::test]
async fn engine_is_shared_across_tasks() -> Result<()> {
    let engine = builtin_engine(Arc::new(HashingTextEmbedder::new(256)?)).await?;
    let transcripts = [
        "switch to currency",
        "what song is this",
        "read the page aloud",
        "tell me the weather",
        "take a picture",
        "how far is the door",
    ];

    let mut expected = Vec::new();
    for transcript in transcripts {
        expected.push(engine.resolve(transcript, None).await?);
    }

    let handles: Vec<_> = transcripts
        .iter()
        .map(|transcript| {
            let engine = engine.clone();
            let transcript = transcript.to_string();
            tokio::spawn(async move { engine.resolve(&transcript, None).await })
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(expected) {
        let decision = handle.await.expect("task panicked")?;
        assert_eq!(decision, expected);
    }
    Ok(())
}

#[test]
fn resolve_from_synchronous_code() -> Result<()> {
    let engine = tokio_test::block_on(builtin_engine(Arc::new(VocabularyEmbedder::new())))?;
    let decision = tokio_test::block_on(engine.resolve("open the news", None))?;

    assert_eq!(decision.intent(), Intent::Navigate);
    assert_eq!(decision.target(), Some("News"));
    Ok(())
}
