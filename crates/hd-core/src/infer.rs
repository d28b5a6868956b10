//! Exhaustive inference: enumerate, evaluate, accumulate, normalize.
//!
//! [`infer`] is the single entry point for callers that just want the
//! posterior. [`InferenceEngine`] validates the model once and exposes the
//! accumulation and parallelism options plus run statistics.

use std::time::Instant;

use hd_common::Result;
use hd_config::ModelConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::hypothesis::HypothesisSpace;
use crate::joint::{joint_probability, log_joint_probability};
use crate::population::Population;
use crate::posterior::Posterior;
use crate::tally::{LogPosteriorTally, PosteriorTally};

/// Hypotheses per work unit when running in parallel.
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;

/// Domain in which joint probabilities are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accumulation {
    /// Plain `f64` products and sums.
    #[default]
    Linear,
    /// Log-domain sums with `log_add_exp`; immune to underflow.
    Log,
}

/// Knobs for a single inference run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceOptions {
    pub accumulation: Accumulation,
    /// Evaluate hypothesis chunks on the rayon pool.
    pub parallel: bool,
    pub chunk_size: u64,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            accumulation: Accumulation::Linear,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceStats {
    pub people: usize,
    /// People whose trait is unobserved and therefore enumerated.
    pub free_people: usize,
    pub hypotheses: u64,
    pub accumulation: Accumulation,
    pub workers: usize,
    pub elapsed_ms: u64,
}

/// Posterior plus run statistics.
#[derive(Debug, Clone)]
pub struct InferenceReport {
    pub posterior: Posterior,
    pub stats: InferenceStats,
}

/// Exact inference with a validated, immutable model.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    model: ModelConfig,
    options: InferenceOptions,
}

impl InferenceEngine {
    /// Validate `model`; fails with a configuration error if it is unusable.
    pub fn new(model: ModelConfig) -> Result<Self> {
        Ok(Self {
            model: model.validated()?,
            options: InferenceOptions::default(),
        })
    }

    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    /// Compute every person's posterior gene and trait distributions.
    pub fn run(&self, population: &Population) -> Result<InferenceReport> {
        let started = Instant::now();
        let space = HypothesisSpace::new(population)?;
        let workers = if self.options.parallel {
            rayon::current_num_threads()
        } else {
            1
        };
        info!(
            people = population.len(),
            free_people = space.free_people().len(),
            hypotheses = space.len(),
            accumulation = ?self.options.accumulation,
            workers,
            "starting exhaustive inference"
        );

        let posterior = match self.options.accumulation {
            Accumulation::Linear => self.linear_tally(population, &space).normalize(population)?,
            Accumulation::Log => self.log_tally(population, &space).normalize(population)?,
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(elapsed_ms, "inference complete");

        Ok(InferenceReport {
            posterior,
            stats: InferenceStats {
                people: population.len(),
                free_people: space.free_people().len(),
                hypotheses: space.len(),
                accumulation: self.options.accumulation,
                workers,
                elapsed_ms,
            },
        })
    }

    fn linear_tally(&self, population: &Population, space: &HypothesisSpace) -> PosteriorTally {
        let people = population.len();
        let evaluate = |range| {
            let mut tally = PosteriorTally::new(people);
            space.visit_range(range, |h| {
                tally.accumulate(h, joint_probability(population, h, &self.model));
            });
            tally
        };

        if self.options.parallel {
            space
                .chunks(self.options.chunk_size)
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(evaluate)
                .reduce(|| PosteriorTally::new(people), PosteriorTally::merge)
        } else {
            evaluate(0..space.len())
        }
    }

    fn log_tally(&self, population: &Population, space: &HypothesisSpace) -> LogPosteriorTally {
        let people = population.len();
        let evaluate = |range| {
            let mut tally = LogPosteriorTally::new(people);
            space.visit_range(range, |h| {
                tally.accumulate(h, log_joint_probability(population, h, &self.model));
            });
            tally
        };

        if self.options.parallel {
            space
                .chunks(self.options.chunk_size)
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(evaluate)
                .reduce(|| LogPosteriorTally::new(people), LogPosteriorTally::merge)
        } else {
            evaluate(0..space.len())
        }
    }
}

/// Posterior marginals for every person under `model`.
pub fn infer(population: &Population, model: &ModelConfig) -> Result<Posterior> {
    InferenceEngine::new(model.clone())?
        .run(population)
        .map(|report| report.posterior)
}
