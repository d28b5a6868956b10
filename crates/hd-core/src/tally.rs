//! Posterior accumulation.
//!
//! Every visited hypothesis adds its joint probability to one gene cell and
//! one trait cell per person. Summing over all hypotheses marginalizes the
//! joint; dividing each person's cells by their own total turns the tallies
//! into distributions.
//!
//! `normalize` consumes the tally, so a run can only be normalized once.
//! Tallies from disjoint index ranges combine with `merge`.

use std::collections::BTreeMap;

use hd_common::{Error, Result};
use hd_math::{log_add_exp, normalize_probs, stable_softmax};

use crate::hypothesis::Hypothesis;
use crate::population::Population;
use crate::posterior::{GeneDistribution, PersonPosterior, Posterior, TraitDistribution};

const PRESENT: usize = 0;
const ABSENT: usize = 1;

fn trait_cell(has_trait: bool) -> usize {
    if has_trait {
        PRESENT
    } else {
        ABSENT
    }
}

/// Unnormalized probability mass per person, in linear space.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorTally {
    gene: Vec<[f64; 3]>,
    traits: Vec<[f64; 2]>,
}

impl PosteriorTally {
    pub fn new(people: usize) -> Self {
        Self {
            gene: vec![[0.0; 3]; people],
            traits: vec![[0.0; 2]; people],
        }
    }

    pub fn people(&self) -> usize {
        self.gene.len()
    }

    /// Add `probability` to every person's cells selected by `hypothesis`.
    pub fn accumulate(&mut self, hypothesis: &Hypothesis, probability: f64) {
        for (person, genes) in hypothesis.genes().iter().enumerate() {
            self.gene[person][genes.index()] += probability;
            self.traits[person][trait_cell(hypothesis.has_trait(person))] += probability;
        }
    }

    /// Element-wise sum of two tallies over the same population.
    pub fn merge(mut self, other: PosteriorTally) -> Self {
        for (mine, theirs) in self.gene.iter_mut().zip(&other.gene) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        for (mine, theirs) in self.traits.iter_mut().zip(&other.traits) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        self
    }

    /// Raw gene mass for `person`, indexed by copy count.
    pub fn gene_mass(&self, person: usize) -> [f64; 3] {
        self.gene[person]
    }

    /// Raw trait mass for `person` as `[present, absent]`.
    pub fn trait_mass(&self, person: usize) -> [f64; 2] {
        self.traits[person]
    }

    /// Divide each person's cells by their own total.
    pub fn normalize(self, population: &Population) -> Result<Posterior> {
        let mut people = BTreeMap::new();
        for (index, person) in population.people().iter().enumerate() {
            let degenerate = || Error::DegeneratePosterior {
                person: person.id.to_string(),
            };
            let gene = normalize_probs(&self.gene[index]).ok_or_else(degenerate)?;
            let traits = normalize_probs(&self.traits[index]).ok_or_else(degenerate)?;
            people.insert(person.id.clone(), to_person_posterior(&gene, &traits));
        }
        Ok(Posterior::from_map(people))
    }
}

/// Unnormalized probability mass per person, kept as natural logs.
///
/// Cells start at `-inf` (zero mass) and combine with `log_add_exp`, so
/// joint probabilities far below the smallest positive `f64` still count.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPosteriorTally {
    gene: Vec<[f64; 3]>,
    traits: Vec<[f64; 2]>,
}

impl LogPosteriorTally {
    pub fn new(people: usize) -> Self {
        Self {
            gene: vec![[f64::NEG_INFINITY; 3]; people],
            traits: vec![[f64::NEG_INFINITY; 2]; people],
        }
    }

    pub fn people(&self) -> usize {
        self.gene.len()
    }

    /// Add `exp(log_probability)` to every person's cells selected by `hypothesis`.
    pub fn accumulate(&mut self, hypothesis: &Hypothesis, log_probability: f64) {
        if log_probability == f64::NEG_INFINITY {
            return;
        }
        for (person, genes) in hypothesis.genes().iter().enumerate() {
            let cell = &mut self.gene[person][genes.index()];
            *cell = log_add_exp(*cell, log_probability);
            let cell = &mut self.traits[person][trait_cell(hypothesis.has_trait(person))];
            *cell = log_add_exp(*cell, log_probability);
        }
    }

    pub fn merge(mut self, other: LogPosteriorTally) -> Self {
        for (mine, theirs) in self.gene.iter_mut().zip(&other.gene) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a = log_add_exp(*a, *b);
            }
        }
        for (mine, theirs) in self.traits.iter_mut().zip(&other.traits) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a = log_add_exp(*a, *b);
            }
        }
        self
    }

    pub fn normalize(self, population: &Population) -> Result<Posterior> {
        let mut people = BTreeMap::new();
        for (index, person) in population.people().iter().enumerate() {
            let degenerate = || Error::DegeneratePosterior {
                person: person.id.to_string(),
            };
            let gene = stable_softmax(&self.gene[index]).ok_or_else(degenerate)?;
            let traits = stable_softmax(&self.traits[index]).ok_or_else(degenerate)?;
            people.insert(person.id.clone(), to_person_posterior(&gene, &traits));
        }
        Ok(Posterior::from_map(people))
    }
}

fn to_person_posterior(gene: &[f64], traits: &[f64]) -> PersonPosterior {
    PersonPosterior {
        gene: GeneDistribution::from_array([gene[0], gene[1], gene[2]]),
        traits: TraitDistribution {
            present: traits[PRESENT],
            absent: traits[ABSENT],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Person;
    use hd_common::GeneCount;

    fn pair() -> Population {
        Population::new(vec![Person::new("a"), Person::new("b")]).unwrap()
    }

    fn hyp(genes: [GeneCount; 2], traits: [bool; 2]) -> Hypothesis {
        Hypothesis::new(genes.to_vec(), traits.to_vec())
    }

    #[test]
    fn accumulate_hits_one_cell_per_variable() {
        let mut tally = PosteriorTally::new(2);
        tally.accumulate(&hyp([GeneCount::Two, GeneCount::Zero], [true, false]), 0.25);
        assert_eq!(tally.gene_mass(0), [0.0, 0.0, 0.25]);
        assert_eq!(tally.gene_mass(1), [0.25, 0.0, 0.0]);
        assert_eq!(tally.trait_mass(0), [0.25, 0.0]);
        assert_eq!(tally.trait_mass(1), [0.0, 0.25]);
    }

    #[test]
    fn normalize_divides_by_own_sum() {
        let mut tally = PosteriorTally::new(2);
        tally.accumulate(&hyp([GeneCount::Zero, GeneCount::One], [true, true]), 0.1);
        tally.accumulate(&hyp([GeneCount::One, GeneCount::One], [false, true]), 0.3);
        let posterior = tally.normalize(&pair()).unwrap();

        let a = posterior.get("a").unwrap();
        assert!((a.gene.zero - 0.25).abs() < 1e-12);
        assert!((a.gene.one - 0.75).abs() < 1e-12);
        assert_eq!(a.gene.two, 0.0);
        assert!((a.traits.present - 0.25).abs() < 1e-12);

        let b = posterior.get("b").unwrap();
        assert_eq!(b.gene.one, 1.0);
        assert_eq!(b.traits.present, 1.0);
        assert_eq!(b.traits.absent, 0.0);
    }

    #[test]
    fn zero_mass_is_degenerate_not_nan() {
        let tally = PosteriorTally::new(2);
        let err = tally.normalize(&pair()).unwrap_err();
        assert!(matches!(err, Error::DegeneratePosterior { ref person } if person == "a"));
        assert!(err.is_inference());
    }

    #[test]
    fn merge_is_elementwise_sum() {
        let h1 = hyp([GeneCount::Zero, GeneCount::Two], [false, true]);
        let h2 = hyp([GeneCount::One, GeneCount::Two], [true, true]);

        let mut whole = PosteriorTally::new(2);
        whole.accumulate(&h1, 0.2);
        whole.accumulate(&h2, 0.05);

        let mut left = PosteriorTally::new(2);
        left.accumulate(&h1, 0.2);
        let mut right = PosteriorTally::new(2);
        right.accumulate(&h2, 0.05);

        assert_eq!(left.merge(right), whole);
    }

    #[test]
    fn log_tally_matches_linear() {
        let hs = [
            (hyp([GeneCount::Zero, GeneCount::Two], [false, true]), 0.2),
            (hyp([GeneCount::One, GeneCount::Two], [true, true]), 0.05),
            (hyp([GeneCount::Two, GeneCount::Zero], [true, false]), 0.001),
        ];
        let mut linear = PosteriorTally::new(2);
        let mut log = LogPosteriorTally::new(2);
        for (h, p) in &hs {
            linear.accumulate(h, *p);
            log.accumulate(h, p.ln());
        }
        let a = linear.normalize(&pair()).unwrap();
        let b = log.normalize(&pair()).unwrap();
        assert!(a.max_abs_diff(&b) < 1e-12);
    }

    #[test]
    fn log_tally_survives_linear_underflow() {
        let h = hyp([GeneCount::Zero, GeneCount::One], [true, false]);
        let mut log = LogPosteriorTally::new(2);
        log.accumulate(&h, -2000.0);
        log.accumulate(&hyp([GeneCount::One, GeneCount::One], [true, false]), -2000.0);
        let posterior = log.normalize(&pair()).unwrap();
        let a = posterior.get("a").unwrap();
        assert!((a.gene.zero - 0.5).abs() < 1e-12);
        assert!((a.gene.one - 0.5).abs() < 1e-12);
    }

    #[test]
    fn log_tally_zero_mass_is_degenerate() {
        let mut log = LogPosteriorTally::new(2);
        log.accumulate(
            &hyp([GeneCount::Zero, GeneCount::Zero], [true, true]),
            f64::NEG_INFINITY,
        );
        assert!(matches!(
            log.normalize(&pair()),
            Err(Error::DegeneratePosterior { .. })
        ));
    }

    #[test]
    fn log_merge_matches_single_tally() {
        let h1 = hyp([GeneCount::Zero, GeneCount::Two], [false, true]);
        let h2 = hyp([GeneCount::One, GeneCount::Two], [true, true]);
        let mut whole = LogPosteriorTally::new(2);
        whole.accumulate(&h1, -3.0);
        whole.accumulate(&h2, -4.0);
        let mut left = LogPosteriorTally::new(2);
        left.accumulate(&h1, -3.0);
        let mut right = LogPosteriorTally::new(2);
        right.accumulate(&h2, -4.0);
        let merged = left.merge(right).normalize(&pair()).unwrap();
        assert!(merged.max_abs_diff(&whole.normalize(&pair()).unwrap()) < 1e-12);
    }
}
