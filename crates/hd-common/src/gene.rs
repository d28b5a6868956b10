//! Gene-count and trait vocabulary shared by the model and the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of copies of the gene a person carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    /// All gene counts in ascending order.
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Position of this count in 3-entry tables (0, 1, 2).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn copies(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}

/// What is known about a person's trait before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitObservation {
    Present,
    Absent,
    #[default]
    Unknown,
}

impl TraitObservation {
    /// The fixed trait value, if observed.
    pub fn known(self) -> Option<bool> {
        match self {
            TraitObservation::Present => Some(true),
            TraitObservation::Absent => Some(false),
            TraitObservation::Unknown => None,
        }
    }

    /// Whether a candidate trait value is consistent with this observation.
    pub fn admits(self, has_trait: bool) -> bool {
        self.known().map_or(true, |known| known == has_trait)
    }
}

impl From<Option<bool>> for TraitObservation {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TraitObservation::Present,
            Some(false) => TraitObservation::Absent,
            None => TraitObservation::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gene_count_indices_are_copies() {
        for (i, g) in GeneCount::ALL.iter().enumerate() {
            assert_eq!(g.index(), i);
            assert_eq!(g.copies() as usize, i);
            assert_eq!(GeneCount::from_index(i), Some(*g));
        }
        assert_eq!(GeneCount::from_index(3), None);
    }

    #[test]
    fn observation_admits() {
        assert!(TraitObservation::Present.admits(true));
        assert!(!TraitObservation::Present.admits(false));
        assert!(TraitObservation::Absent.admits(false));
        assert!(!TraitObservation::Absent.admits(true));
        assert!(TraitObservation::Unknown.admits(true));
        assert!(TraitObservation::Unknown.admits(false));
    }

    #[test]
    fn observation_serde_snake_case() {
        let json = serde_json::to_string(&TraitObservation::Present).unwrap();
        assert_eq!(json, "\"present\"");
        let back: TraitObservation = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(back, TraitObservation::Unknown);
    }
}
