//! Heredity common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the heredity crates:
//! - Person and run identity types
//! - Gene-count and trait-observation vocabulary
//! - Common error types
//! - Output format selection

pub mod error;
pub mod gene;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use gene::{GeneCount, TraitObservation};
pub use id::{PersonId, RunId};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
