//! Exact posterior inference for a discrete heredity model.
//!
//! Given a family forest, per-person trait observations and a fixed
//! conditional model, [`infer`] enumerates every gene/trait hypothesis,
//! evaluates its joint probability and accumulates per-person posterior
//! marginals.
//!
//! ```no_run
//! use hd_config::ModelConfig;
//! use hd_core::load::load_population;
//!
//! let population = load_population(std::path::Path::new("data/family0.csv"))?;
//! let posterior = hd_core::infer(&population, &ModelConfig::default())?;
//! for (id, person) in posterior.iter() {
//!     println!("{id}: P(trait) = {:.4}", person.traits.present);
//! }
//! # Ok::<(), hd_common::Error>(())
//! ```

pub mod cli;
pub mod exit_codes;
pub mod hypothesis;
pub mod infer;
pub mod joint;
pub mod load;
pub mod logging;
pub mod output;
pub mod population;
pub mod posterior;
pub mod tally;

pub use hypothesis::{Hypothesis, HypothesisSpace};
pub use infer::{
    infer, Accumulation, InferenceEngine, InferenceOptions, InferenceReport, InferenceStats,
};
pub use population::{Person, Population};
pub use posterior::{GeneDistribution, PersonPosterior, Posterior, TraitDistribution};
pub use tally::{LogPosteriorTally, PosteriorTally};
