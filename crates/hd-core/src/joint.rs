//! Joint probability of a single hypothesis.
//!
//! Each person's gene count depends only on their parents' gene counts (or
//! the population prior for founders), and each person's trait depends only
//! on their own gene count. The joint probability of a hypothesis is the
//! product of one such factor per person.
//!
//! # Inheritance law
//!
//! A parent passes one copy of the gene to the child with probability
//!
//! | parent copies | P(transmit) |
//! |---------------|-------------|
//! | 0             | ε           |
//! | 1             | 0.5         |
//! | 2             | 1 − ε       |
//!
//! and the child's count is the number of copies received from the two
//! independent parents.

use hd_common::GeneCount;
use hd_config::ModelConfig;
use hd_math::ln_prob;

use crate::hypothesis::Hypothesis;
use crate::population::Population;

/// Probability that a parent with `parent` copies passes one copy on.
pub fn transmission_probability(parent: GeneCount, mutation: f64) -> f64 {
    match parent {
        GeneCount::Zero => mutation,
        GeneCount::One => 0.5,
        GeneCount::Two => 1.0 - mutation,
    }
}

/// P(child has `child` copies | mother and father gene counts).
pub fn inheritance_probability(
    child: GeneCount,
    mother: GeneCount,
    father: GeneCount,
    mutation: f64,
) -> f64 {
    let from_mother = transmission_probability(mother, mutation);
    let from_father = transmission_probability(father, mutation);
    match child {
        GeneCount::Two => from_mother * from_father,
        GeneCount::Zero => (1.0 - from_mother) * (1.0 - from_father),
        GeneCount::One => from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father,
    }
}

/// Probability of the gene count assigned to `person`, given everyone else's.
pub fn gene_probability(
    population: &Population,
    hypothesis: &Hypothesis,
    person: usize,
    model: &ModelConfig,
) -> f64 {
    let genes = hypothesis.gene_count(person);
    match population.parents(person) {
        None => model.gene_prior(genes),
        Some(parents) => inheritance_probability(
            genes,
            hypothesis.gene_count(parents.mother),
            hypothesis.gene_count(parents.father),
            model.mutation,
        ),
    }
}

/// Gene factor times trait likelihood for one person.
pub fn person_probability(
    population: &Population,
    hypothesis: &Hypothesis,
    person: usize,
    model: &ModelConfig,
) -> f64 {
    let prior = gene_probability(population, hypothesis, person, model);
    let likelihood =
        model.trait_likelihood(hypothesis.gene_count(person), hypothesis.has_trait(person));
    prior * likelihood
}

/// Probability of the complete hypothesis. Always in `[0, 1]`.
pub fn joint_probability(
    population: &Population,
    hypothesis: &Hypothesis,
    model: &ModelConfig,
) -> f64 {
    (0..population.len())
        .map(|person| person_probability(population, hypothesis, person, model))
        .product()
}

/// Natural log of [`joint_probability`], `-inf` for zero-mass hypotheses.
///
/// Sums per-person logs instead of multiplying, so large families do not
/// underflow to zero.
pub fn log_joint_probability(
    population: &Population,
    hypothesis: &Hypothesis,
    model: &ModelConfig,
) -> f64 {
    (0..population.len())
        .map(|person| ln_prob(person_probability(population, hypothesis, person, model)))
        .sum()
}
