//! Hypothesis enumeration.
//!
//! A hypothesis fixes a gene count for every person and a trait value for
//! every person. People with an observed trait keep that value in every
//! hypothesis; only unobserved people vary. The space is addressed by a
//! single `u64` index:
//!
//! ```text
//! index = gene_index * trait_states + trait_index
//! gene_index  : one base-3 digit per person (arena order)
//! trait_index : one base-2 digit per unobserved person
//! ```
//!
//! so `len() == 3^n * 2^(n - k)` for `n` people and `k` observations, and
//! every index decodes to exactly one hypothesis.

use std::ops::Range;

use hd_common::{Error, GeneCount, Result};

use crate::population::Population;

/// One complete assignment of gene counts and trait values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
}

impl Hypothesis {
    /// Build a hypothesis from per-person vectors in arena order.
    ///
    /// # Panics
    /// Panics if the two vectors differ in length.
    pub fn new(genes: Vec<GeneCount>, traits: Vec<bool>) -> Self {
        assert_eq!(genes.len(), traits.len(), "one gene count and one trait per person");
        Self { genes, traits }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[GeneCount] {
        &self.genes
    }

    pub fn traits(&self) -> &[bool] {
        &self.traits
    }

    pub fn gene_count(&self, person: usize) -> GeneCount {
        self.genes[person]
    }

    pub fn has_trait(&self, person: usize) -> bool {
        self.traits[person]
    }

    /// People carrying exactly one copy.
    pub fn one_copy(&self) -> impl Iterator<Item = usize> + '_ {
        self.with_genes(GeneCount::One)
    }

    /// People carrying exactly two copies.
    pub fn two_copies(&self) -> impl Iterator<Item = usize> + '_ {
        self.with_genes(GeneCount::Two)
    }

    /// People exhibiting the trait.
    pub fn trait_carriers(&self) -> impl Iterator<Item = usize> + '_ {
        self.traits
            .iter()
            .enumerate()
            .filter(|(_, has)| **has)
            .map(|(i, _)| i)
    }

    fn with_genes(&self, target: GeneCount) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter(move |(_, g)| **g == target)
            .map(|(i, _)| i)
    }
}

/// The finite, restartable space of hypotheses consistent with observations.
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    people: usize,
    /// Arena indices of people whose trait is not observed.
    free: Vec<usize>,
    /// Trait vector with observed values filled in and free people `false`.
    base_traits: Vec<bool>,
    gene_states: u64,
    trait_states: u64,
}

impl HypothesisSpace {
    pub fn new(population: &Population) -> Result<Self> {
        let people = population.len();
        let mut free = Vec::new();
        let mut base_traits = Vec::with_capacity(people);
        for index in 0..people {
            match population.observation(index).known() {
                Some(value) => base_traits.push(value),
                None => {
                    free.push(index);
                    base_traits.push(false);
                }
            }
        }

        let too_large = || Error::HypothesisSpaceTooLarge { people };
        let exponent = u32::try_from(people).map_err(|_| too_large())?;
        let gene_states = 3u64.checked_pow(exponent).ok_or_else(too_large)?;
        let free_exponent = u32::try_from(free.len()).map_err(|_| too_large())?;
        let trait_states = 1u64.checked_shl(free_exponent).ok_or_else(too_large)?;
        gene_states.checked_mul(trait_states).ok_or_else(too_large)?;

        Ok(Self {
            people,
            free,
            base_traits,
            gene_states,
            trait_states,
        })
    }

    /// Total number of hypotheses: `3^n * 2^(free people)`.
    pub fn len(&self) -> u64 {
        self.gene_states * self.trait_states
    }

    /// Always false: even an empty population has the trivial hypothesis.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn people(&self) -> usize {
        self.people
    }

    /// Arena indices of people whose trait varies across hypotheses.
    pub fn free_people(&self) -> &[usize] {
        &self.free
    }

    /// Decode a single hypothesis by index.
    pub fn hypothesis(&self, index: u64) -> Option<Hypothesis> {
        (index < self.len()).then(|| self.decode(index))
    }

    /// Lazily iterate every hypothesis once, in index order.
    pub fn iter(&self) -> Hypotheses<'_> {
        Hypotheses {
            space: self,
            next: 0,
            current: None,
        }
    }

    /// Visit every hypothesis whose index lies in `range`.
    ///
    /// Walks the range with an in-place odometer, so no hypothesis is
    /// allocated after the first. Indices past `len()` are ignored.
    pub fn visit_range<F>(&self, range: Range<u64>, mut visit: F)
    where
        F: FnMut(&Hypothesis),
    {
        let end = range.end.min(self.len());
        if range.start >= end {
            return;
        }
        let mut hypothesis = self.decode(range.start);
        for _ in range.start..end {
            visit(&hypothesis);
            self.advance(&mut hypothesis);
        }
    }

    /// Split the index space into contiguous ranges of at most `chunk_size`.
    pub fn chunks(&self, chunk_size: u64) -> impl Iterator<Item = Range<u64>> {
        let len = self.len();
        let step = chunk_size.max(1);
        (0..len.div_ceil(step)).map(move |i| {
            let start = i * step;
            start..(start + step).min(len)
        })
    }

    fn decode(&self, index: u64) -> Hypothesis {
        let mut gene_index = index / self.trait_states;
        let trait_index = index % self.trait_states;

        let mut genes = Vec::with_capacity(self.people);
        for _ in 0..self.people {
            // Digit is always < 3.
            genes.push(GeneCount::ALL[(gene_index % 3) as usize]);
            gene_index /= 3;
        }

        let mut traits = self.base_traits.clone();
        for (bit, person) in self.free.iter().enumerate() {
            traits[*person] = (trait_index >> bit) & 1 == 1;
        }

        Hypothesis { genes, traits }
    }

    /// Step to the hypothesis with the next index, wrapping after the last.
    fn advance(&self, hypothesis: &mut Hypothesis) {
        for person in &self.free {
            let has = &mut hypothesis.traits[*person];
            if !*has {
                *has = true;
                return;
            }
            *has = false;
        }
        for genes in hypothesis.genes.iter_mut() {
            match *genes {
                GeneCount::Zero => {
                    *genes = GeneCount::One;
                    return;
                }
                GeneCount::One => {
                    *genes = GeneCount::Two;
                    return;
                }
                GeneCount::Two => *genes = GeneCount::Zero,
            }
        }
    }
}

/// Iterator over every hypothesis in a [`HypothesisSpace`].
#[derive(Debug, Clone)]
pub struct Hypotheses<'a> {
    space: &'a HypothesisSpace,
    next: u64,
    current: Option<Hypothesis>,
}

impl Iterator for Hypotheses<'_> {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        if self.next >= self.space.len() {
            return None;
        }
        let current = match self.current.take() {
            Some(mut previous) => {
                self.space.advance(&mut previous);
                previous
            }
            None => self.space.decode(self.next),
        };
        self.next += 1;
        self.current = Some(current.clone());
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len() - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<'a> IntoIterator for &'a HypothesisSpace {
    type Item = Hypothesis;
    type IntoIter = Hypotheses<'a>;

    fn into_iter(self) -> Hypotheses<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Person;
    use hd_common::TraitObservation;
    use std::collections::HashSet;

    fn unobserved(n: usize) -> Population {
        Population::new((0..n).map(|i| Person::new(format!("p{i}")))).unwrap()
    }

    #[test]
    fn empty_population_has_one_hypothesis() {
        let space = HypothesisSpace::new(&Population::default()).unwrap();
        assert_eq!(space.len(), 1);
        let all: Vec<Hypothesis> = space.iter().collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn count_without_observations() {
        for n in 0..5 {
            let space = HypothesisSpace::new(&unobserved(n)).unwrap();
            let expected = 3u64.pow(n as u32) * 2u64.pow(n as u32);
            assert_eq!(space.len(), expected);
            assert_eq!(space.iter().count() as u64, expected);
        }
    }

    #[test]
    fn count_with_observations() {
        let population = Population::new(vec![
            Person::new("a").with_observation(TraitObservation::Present),
            Person::new("b").with_observation(TraitObservation::Absent),
            Person::new("c"),
        ])
        .unwrap();
        let space = HypothesisSpace::new(&population).unwrap();
        assert_eq!(space.len(), 27 * 2);
        assert_eq!(space.free_people(), &[2]);
        for h in space.iter() {
            assert!(h.has_trait(0));
            assert!(!h.has_trait(1));
        }
    }

    #[test]
    fn every_hypothesis_visited_once() {
        let space = HypothesisSpace::new(&unobserved(3)).unwrap();
        let seen: HashSet<(Vec<GeneCount>, Vec<bool>)> = space
            .iter()
            .map(|h| (h.genes().to_vec(), h.traits().to_vec()))
            .collect();
        assert_eq!(seen.len() as u64, space.len());
    }

    #[test]
    fn iterator_matches_decode() {
        let space = HypothesisSpace::new(&unobserved(3)).unwrap();
        for (i, h) in space.iter().enumerate() {
            assert_eq!(Some(h), space.hypothesis(i as u64));
        }
        assert!(space.hypothesis(space.len()).is_none());
    }

    #[test]
    fn iterator_is_restartable() {
        let space = HypothesisSpace::new(&unobserved(2)).unwrap();
        let first: Vec<Hypothesis> = space.iter().collect();
        let second: Vec<Hypothesis> = (&space).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn visit_range_matches_iterator_slice() {
        let space = HypothesisSpace::new(&unobserved(3)).unwrap();
        let expected: Vec<Hypothesis> = space.iter().skip(17).take(40).collect();
        let mut visited = Vec::new();
        space.visit_range(17..57, |h| visited.push(h.clone()));
        assert_eq!(visited, expected);
    }

    #[test]
    fn visit_range_clamps_to_len() {
        let space = HypothesisSpace::new(&unobserved(1)).unwrap();
        let mut count = 0;
        space.visit_range(4..100, |_| count += 1);
        assert_eq!(count, 2);
        space.visit_range(10..20, |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn chunks_cover_space() {
        let space = HypothesisSpace::new(&unobserved(2)).unwrap();
        let chunks: Vec<Range<u64>> = space.chunks(7).collect();
        assert_eq!(chunks.first().map(|r| r.start), Some(0));
        assert_eq!(chunks.last().map(|r| r.end), Some(space.len()));
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let total: u64 = chunks.iter().map(|r| r.end - r.start).sum();
        assert_eq!(total, space.len());
    }

    #[test]
    fn gene_subsets_are_disjoint() {
        let space = HypothesisSpace::new(&unobserved(3)).unwrap();
        for h in space.iter() {
            let one: HashSet<usize> = h.one_copy().collect();
            let two: HashSet<usize> = h.two_copies().collect();
            assert!(one.is_disjoint(&two));
            for (i, g) in h.genes().iter().enumerate() {
                assert_eq!(*g == GeneCount::One, one.contains(&i));
                assert_eq!(*g == GeneCount::Two, two.contains(&i));
            }
        }
    }

    #[test]
    fn trait_carriers_listed() {
        let h = Hypothesis::new(
            vec![GeneCount::Zero, GeneCount::Two, GeneCount::One],
            vec![true, false, true],
        );
        assert_eq!(h.trait_carriers().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(h.one_copy().collect::<Vec<_>>(), vec![2]);
        assert_eq!(h.two_copies().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn oversized_space_rejected() {
        let err = HypothesisSpace::new(&unobserved(40)).unwrap_err();
        assert!(matches!(err, Error::HypothesisSpaceTooLarge { people: 40 }));
        assert!(err.is_inference());
    }
}
