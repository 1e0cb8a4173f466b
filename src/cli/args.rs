//! Command line argument parsing for the signpost CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::embedding::hashing_embedder::DEFAULT_DIMENSION;

/// Signpost - route voice-command transcripts to assistant features
#[derive(Parser, Debug, Clone)]
#[command(name = "signpost")]
#[command(about = "Route voice-command transcripts to assistant features")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SignpostArgs {
    /// Verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Feature catalog file (JSON array of feature definitions)
    #[arg(long, value_name = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,

    /// Router configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Embedding provider for semantic routing
    #[arg(long, default_value = "hashing")]
    pub embedder: EmbedderKind,

    /// Embedding dimension (hashing buckets, or requested OpenAI dimension)
    #[arg(long)]
    pub dimension: Option<usize>,

    /// OpenAI embedding model
    #[arg(long, env = "SIGNPOST_OPENAI_MODEL", default_value = "text-embedding-3-small")]
    pub openai_model: String,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SignpostArgs {
    /// Effective verbosity: 0 quiet, 1 default, 2 verbose, 3+ debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Dimension for the hashing embedder.
    pub fn hashing_dimension(&self) -> usize {
        self.dimension.unwrap_or(DEFAULT_DIMENSION)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Route a single transcript
    Route(RouteArgs),

    /// Route every request of a JSON-lines file
    Batch(BatchArgs),

    /// List catalog features
    Catalog(CatalogArgs),

    /// Report dropped duplicate phrases and validate the configuration
    Check,
}

/// Arguments for routing one transcript
#[derive(Parser, Debug, Clone)]
pub struct RouteArgs {
    /// Transcript text
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: String,

    /// Feature currently active on screen
    #[arg(short, long, value_name = "FEATURE")]
    pub active: Option<String>,
}

/// Arguments for batch routing
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File with one `{"transcript": ..., "active_feature": ...}` object per line
    #[arg(value_name = "REQUESTS_FILE")]
    pub file: PathBuf,
}

/// Arguments for listing the catalog
#[derive(Parser, Debug, Clone)]
pub struct CatalogArgs {
    /// Print every keyword, action phrase and alias instead of counts
    #[arg(long)]
    pub phrases: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON (one document per line for batches)
    Json,
}

/// Embedding providers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderKind {
    /// Deterministic feature hashing, no model required
    Hashing,
    /// OpenAI embeddings API (requires the `embeddings-openai` feature)
    Openai,
}
