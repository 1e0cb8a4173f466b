//! Command implementations for the signpost CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::catalog::Catalog;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::embedding::{HashingTextEmbedder, TextEmbedder};
use crate::error::{Result, SignpostError};
use crate::router::{IntentEngine, RouteRequest, RouterConfig};

/// Execute a CLI command.
pub fn execute_command(args: SignpostArgs) -> Result<()> {
    match &args.command {
        Command::Catalog(catalog_args) => show_catalog(catalog_args.clone(), &args),
        Command::Check => check(&args),
        Command::Route(route_args) => {
            let route_args = route_args.clone();
            runtime()?.block_on(route(route_args, &args))
        }
        Command::Batch(batch_args) => {
            let batch_args = batch_args.clone();
            runtime()?.block_on(batch(batch_args, &args))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Load the catalog named on the command line, or the built-in one.
pub fn load_catalog(args: &SignpostArgs) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => {
            info!("loading catalog from {}", path.display());
            Catalog::from_json_file(path)
        }
        None => Catalog::builtin(),
    }
}

/// Load the router configuration named on the command line, or the defaults.
pub fn load_config(args: &SignpostArgs) -> Result<RouterConfig> {
    match &args.config {
        Some(path) => {
            info!("loading router config from {}", path.display());
            RouterConfig::from_json_file(path)
        }
        None => Ok(RouterConfig::default()),
    }
}

/// Create the embedder selected with `--embedder`.
pub fn build_embedder(args: &SignpostArgs) -> Result<Arc<dyn TextEmbedder>> {
    match args.embedder {
        EmbedderKind::Hashing => Ok(Arc::new(HashingTextEmbedder::new(
            args.hashing_dimension(),
        )?)),
        EmbedderKind::Openai => build_openai_embedder(args),
    }
}

#[cfg(feature = "embeddings-openai")]
fn build_openai_embedder(args: &SignpostArgs) -> Result<Arc<dyn TextEmbedder>> {
    use crate::embedding::OpenAITextEmbedder;

    let api_key = args
        .openai_api_key
        .clone()
        .ok_or_else(|| SignpostError::config("OPENAI_API_KEY is not set"))?;
    let embedder = match args.dimension {
        Some(dimension) => {
            OpenAITextEmbedder::with_dimension(api_key, args.openai_model.clone(), dimension)?
        }
        None => OpenAITextEmbedder::new(api_key, args.openai_model.clone())?,
    };
    Ok(Arc::new(embedder))
}

#[cfg(not(feature = "embeddings-openai"))]
fn build_openai_embedder(_args: &SignpostArgs) -> Result<Arc<dyn TextEmbedder>> {
    Err(SignpostError::config(
        "signpost was built without the `embeddings-openai` feature",
    ))
}

async fn build_engine(args: &SignpostArgs) -> Result<IntentEngine> {
    let catalog = Arc::new(load_catalog(args)?);
    let config = load_config(args)?;
    let embedder = build_embedder(args)?;
    debug!(
        "building engine: {} features, embedder '{}'",
        catalog.len(),
        embedder.name()
    );
    IntentEngine::new(catalog, embedder, config).await
}

/// Route a single transcript.
async fn route(args: RouteArgs, cli_args: &SignpostArgs) -> Result<()> {
    let engine = build_engine(cli_args).await?;
    let decision = engine
        .resolve(&args.transcript, args.active.as_deref())
        .await?;
    output_decision(&decision, cli_args)
}

/// Route every request of a JSON-lines file.
async fn batch(args: BatchArgs, cli_args: &SignpostArgs) -> Result<()> {
    let lines = read_requests(&args.file)?;
    let engine = build_engine(cli_args).await?;

    let requests: Vec<RouteRequest> = lines
        .iter()
        .filter_map(|(_, parsed)| parsed.as_ref().ok().cloned())
        .collect();
    info!("routing {} requests from {}", requests.len(), args.file.display());

    let mut decisions = engine.resolve_batch(&requests).await.into_iter();
    let mut results = Vec::with_capacity(lines.len());
    for (line, parsed) in lines {
        let outcome = match parsed {
            Ok(_) => decisions
                .next()
                .unwrap_or_else(|| Err(SignpostError::other("missing batch result"))),
            Err(e) => Err(e),
        };
        results.push(match outcome {
            Ok(decision) => BatchLineResult {
                line,
                decision: Some(decision),
                error: None,
            },
            Err(e) => BatchLineResult {
                line,
                decision: None,
                error: Some(e.to_string()),
            },
        });
    }

    output_batch(&results, cli_args)
}

/// Parse a JSON-lines requests file, keeping per-line parse errors.
///
/// Blank lines are skipped; line numbers are 1-based.
pub fn read_requests<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, Result<RouteRequest>)>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut requests = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<RouteRequest>(&line).map_err(SignpostError::from);
        requests.push((index + 1, parsed));
    }
    Ok(requests)
}

/// List catalog features.
fn show_catalog(args: CatalogArgs, cli_args: &SignpostArgs) -> Result<()> {
    let catalog = load_catalog(cli_args)?;
    let features = FeatureSummary::from_catalog(&catalog);
    output_catalog(&features, args.phrases, cli_args)
}

/// Report dropped phrases and configuration problems.
fn check(cli_args: &SignpostArgs) -> Result<()> {
    let catalog = load_catalog(cli_args)?;
    let report = check_report(&catalog, load_config(cli_args));
    output_check(&report, cli_args)?;

    if report.is_ok() {
        Ok(())
    } else {
        Err(SignpostError::config("check failed"))
    }
}

/// Build a [`CheckReport`] for `catalog` and a configuration load outcome.
pub fn check_report(catalog: &Catalog, config: Result<RouterConfig>) -> CheckReport {
    let (config, config_error) = match config {
        Ok(config) => (config, None),
        Err(e) => (RouterConfig::default(), Some(e.to_string())),
    };

    CheckReport {
        features: catalog.len(),
        dropped: catalog.dropped_phrases().to_vec(),
        config_valid: config_error.is_none(),
        config_error,
        default_feature_present: catalog.feature(&config.default_feature).is_some(),
        default_feature: config.default_feature,
    }
}
