//! The feature catalog: every feature the assistant can route to.
//!
//! A catalog is built once from an ordered list of
//! [`FeatureDefinition`](definition::FeatureDefinition)s and is immutable
//! afterwards, so it can be shared between concurrent requests without
//! locking.
//!
//! # Module Structure
//!
//! - `definition`: serializable raw definitions (what config files contain)
//! - `feature`: the built, normalized [`Feature`] and [`Action`] types
//! - `registry`: [`Catalog`] construction with phrase deduplication
//! - `builtin`: the default assistant feature set

pub mod builtin;
pub mod definition;
pub mod feature;
pub mod registry;

pub use definition::{ActionDefinition, FeatureDefinition};
pub use feature::{Action, Feature, FeatureId};
pub use registry::{Catalog, DroppedPhrase, PhraseKind};
