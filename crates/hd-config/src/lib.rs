//! Heredity model configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for model.json (gene prior, trait likelihood, mutation)
//! - Model resolution (CLI → env → XDG → embedded default)
//! - Semantic validation
//! - Model snapshots for run reports

pub mod model;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use model::{GenePrior, ModelConfig, TraitLikelihood, TraitParams};
pub use resolve::{resolve_model, resolve_model_with, ModelSource, MODEL_ENV_VAR};
pub use snapshot::ModelSnapshot;
pub use validate::{ValidationError, ValidationResult, SUM_TOLERANCE};

/// Schema version for model files.
pub const CONFIG_SCHEMA_VERSION: &str = hd_common::SCHEMA_VERSION;
