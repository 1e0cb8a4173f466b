//! Voice-command intent routing.
//!
//! Given a transcript and the feature currently on screen (if any), the
//! [`IntentEngine`] decides whether the user wants to navigate to another
//! feature, trigger an action in the current one, or ask a free-form query,
//! and which feature should handle it.
//!
//! # Module Structure
//!
//! - `decision`: the [`IntentDecision`] output record
//! - `config`: tunable thresholds and static phrase tables
//! - `trigger`: explicit "switch to X" navigation parsing
//! - `keyword`: exact phrase matching over the catalog
//! - `semantic`: embedding-based fallback routing
//! - `engine`: precedence orchestration

pub mod config;
pub mod decision;
pub mod engine;
pub mod keyword;
pub mod semantic;
pub mod trigger;

pub use config::{LiteralAction, RouterConfig};
pub use decision::{Intent, IntentDecision, ResolutionStage};
pub use engine::{IntentEngine, RouteRequest};
pub use keyword::KeywordMatcher;
pub use semantic::{SemanticIndex, SemanticRouter};
pub use trigger::TriggerParser;
