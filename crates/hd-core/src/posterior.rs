//! Normalized per-person posterior distributions.

use std::collections::BTreeMap;

use hd_common::{GeneCount, PersonId};
use serde::{Deserialize, Serialize};

/// P(gene count) for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneDistribution {
    pub zero: f64,
    pub one: f64,
    pub two: f64,
}

impl GeneDistribution {
    pub fn from_array(values: [f64; 3]) -> Self {
        Self {
            zero: values[0],
            one: values[1],
            two: values[2],
        }
    }

    pub fn get(&self, genes: GeneCount) -> f64 {
        match genes {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    pub fn sum(&self) -> f64 {
        self.zero + self.one + self.two
    }
}

/// P(trait) for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitDistribution {
    pub present: f64,
    pub absent: f64,
}

impl TraitDistribution {
    pub fn get(&self, has_trait: bool) -> f64 {
        if has_trait {
            self.present
        } else {
            self.absent
        }
    }

    pub fn sum(&self) -> f64 {
        self.present + self.absent
    }
}

/// Both marginals for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonPosterior {
    pub gene: GeneDistribution,
    #[serde(rename = "trait")]
    pub traits: TraitDistribution,
}

/// Posterior marginals for every person, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Posterior {
    people: BTreeMap<PersonId, PersonPosterior>,
}

impl Posterior {
    pub(crate) fn from_map(people: BTreeMap<PersonId, PersonPosterior>) -> Self {
        Self { people }
    }

    pub fn get(&self, id: &str) -> Option<&PersonPosterior> {
        self.people.get(id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &PersonPosterior)> {
        self.people.iter()
    }

    /// Largest absolute difference between any two matching entries.
    ///
    /// Returns infinity if the two posteriors cover different people.
    pub fn max_abs_diff(&self, other: &Posterior) -> f64 {
        if self.people.len() != other.people.len() {
            return f64::INFINITY;
        }
        let mut worst: f64 = 0.0;
        for (id, a) in &self.people {
            let Some(b) = other.people.get(id) else {
                return f64::INFINITY;
            };
            for genes in GeneCount::ALL {
                worst = worst.max((a.gene.get(genes) - b.gene.get(genes)).abs());
            }
            for has_trait in [true, false] {
                worst = worst.max((a.traits.get(has_trait) - b.traits.get(has_trait)).abs());
            }
        }
        worst
    }
}
