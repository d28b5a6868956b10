//! Conditional-probability model types.
//!
//! These types match the model.json layout: a gene prior for parentless
//! people, a trait likelihood per gene count, and a single mutation rate.

use hd_common::GeneCount;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Complete model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    pub gene_prior: GenePrior,

    pub trait_likelihood: TraitLikelihood,

    /// Probability that a transmitted copy mutates (present ↔ absent).
    pub mutation: f64,
}

/// Unconditional gene-count distribution for people with no listed parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenePrior {
    pub zero: f64,
    pub one: f64,
    pub two: f64,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl GenePrior {
    pub fn new(zero: f64, one: f64, two: f64) -> Self {
        Self {
            zero,
            one,
            two,
            comment: None,
        }
    }

    /// Uniform prior over 0, 1, 2 copies.
    pub fn uniform() -> Self {
        Self::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
    }

    pub fn get(&self, genes: GeneCount) -> f64 {
        match genes {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.zero, self.one, self.two]
    }

    pub fn sum(&self) -> f64 {
        self.zero + self.one + self.two
    }
}

/// P(trait | gene count) for a single gene count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitParams {
    pub present: f64,
    pub absent: f64,
}

impl TraitParams {
    pub fn new(present: f64, absent: f64) -> Self {
        Self { present, absent }
    }

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

/// Trait likelihood table keyed by gene count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitLikelihood {
    pub zero: TraitParams,
    pub one: TraitParams,
    pub two: TraitParams,
}

impl TraitLikelihood {
    pub fn get(&self, genes: GeneCount) -> &TraitParams {
        match genes {
            GeneCount::Zero => &self.zero,
            GeneCount::One => &self.one,
            GeneCount::Two => &self.two,
        }
    }
}

impl ModelConfig {
    /// Load a model from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse a model from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Build a model from explicit tables, tagged with the current schema version.
    pub fn new(gene_prior: GenePrior, trait_likelihood: TraitLikelihood, mutation: f64) -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            gene_prior,
            trait_likelihood,
            mutation,
        }
    }

    /// Same model with a different gene prior.
    pub fn with_gene_prior(mut self, gene_prior: GenePrior) -> Self {
        self.gene_prior = gene_prior;
        self
    }

    /// Same model with a different mutation rate.
    pub fn with_mutation(mut self, mutation: f64) -> Self {
        self.mutation = mutation;
        self
    }

    /// Prior probability of `genes` for a person with no listed parents.
    pub fn gene_prior(&self, genes: GeneCount) -> f64 {
        self.gene_prior.get(genes)
    }

    /// P(trait = `has_trait` | gene count = `genes`).
    pub fn trait_likelihood(&self, genes: GeneCount, has_trait: bool) -> f64 {
        self.trait_likelihood.get(genes).get(has_trait)
    }

    /// Validate and return the model, or the first problem found.
    pub fn validated(self) -> Result<Self, ValidationError> {
        crate::validate::validate_model(&self)?;
        Ok(self)
    }
}

/// Embedded default model JSON for fallback.
const DEFAULT_MODEL_JSON: &str = include_str!("schemas/model.default.json");

impl Default for ModelConfig {
    fn default() -> Self {
        // The JSON is embedded at compile time and covered by tests.
        Self::parse_json(DEFAULT_MODEL_JSON).expect("Embedded default model JSON is invalid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_model_json() -> &'static str {
        r#"{
            "schema_version": "1.0.0",
            "gene_prior": {"zero": 0.5, "one": 0.3, "two": 0.2},
            "trait_likelihood": {
                "zero": {"present": 0.1, "absent": 0.9},
                "one": {"present": 0.5, "absent": 0.5},
                "two": {"present": 0.8, "absent": 0.2}
            },
            "mutation": 0.05
        }"#
    }

    #[test]
    fn test_parse_minimal_model() {
        let model = ModelConfig::parse_json(minimal_model_json()).unwrap();
        assert_eq!(model.schema_version, "1.0.0");
        assert!(model.description.is_none());
        assert!((model.gene_prior(GeneCount::One) - 0.3).abs() < 1e-12);
        assert!((model.trait_likelihood(GeneCount::Two, true) - 0.8).abs() < 1e-12);
        assert!((model.mutation - 0.05).abs() < 1e-12);
    }

    #[test]
    fn default_model_matches_reference_constants() {
        let model = ModelConfig::default();
        let expected_prior = [0.96, 0.03, 0.01];
        for (got, want) in model.gene_prior.as_array().iter().zip(expected_prior) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!((model.trait_likelihood(GeneCount::Zero, true) - 0.01).abs() < 1e-12);
        assert!((model.trait_likelihood(GeneCount::One, true) - 0.56).abs() < 1e-12);
        assert!((model.trait_likelihood(GeneCount::Two, false) - 0.35).abs() < 1e-12);
        assert!((model.mutation - 0.01).abs() < 1e-12);
        assert!(model.gene_prior.comment.is_some());
    }

    #[test]
    fn default_model_is_valid() {
        assert!(ModelConfig::default().validated().is_ok());
    }

    #[test]
    fn gene_prior_lookup_by_count() {
        let prior = GenePrior::new(0.7, 0.2, 0.1);
        assert_eq!(prior.get(GeneCount::Zero), 0.7);
        assert_eq!(prior.get(GeneCount::One), 0.2);
        assert_eq!(prior.get(GeneCount::Two), 0.1);
    }

    #[test]
    fn gene_prior_uniform_sums_to_one() {
        assert!((GenePrior::uniform().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trait_params_lookup() {
        let t = TraitParams::new(0.3, 0.7);
        assert_eq!(t.get(true), 0.3);
        assert_eq!(t.get(false), 0.7);
    }

    #[test]
    fn builder_overrides() {
        let model = ModelConfig::default()
            .with_gene_prior(GenePrior::uniform())
            .with_mutation(0.2);
        assert_eq!(model.mutation, 0.2);
        assert_eq!(model.gene_prior, GenePrior::uniform());
        assert_eq!(model.schema_version, "1.0.0");
    }

    #[test]
    fn model_parse_invalid_json() {
        let result = ModelConfig::parse_json("{not valid json}");
        assert!(matches!(result, Err(ValidationError::ParseError(_))));
    }

    #[test]
    fn model_parse_missing_tables() {
        let result = ModelConfig::parse_json(r#"{"schema_version": "1.0.0", "mutation": 0.01}"#);
        assert!(result.is_err());
    }

    #[test]
    fn model_serde_roundtrip() {
        let model = ModelConfig::default();
        let json = serde_json::to_string(&model).unwrap();
        let back = ModelConfig::parse_json(&json).unwrap();
        assert_eq!(back.schema_version, model.schema_version);
        assert_eq!(back.gene_prior.comment, model.gene_prior.comment);
        assert!((back.gene_prior.two - model.gene_prior.two).abs() < 1e-12);
        assert!((back.mutation - model.mutation).abs() < 1e-12);
    }

    #[test]
    fn model_from_file_nonexistent() {
        let result = ModelConfig::from_file(std::path::Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(ValidationError::IoError(_))));
    }

    #[test]
    fn model_from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, minimal_model_json()).unwrap();
        let model = ModelConfig::from_file(&path).unwrap();
        assert!((model.gene_prior.zero - 0.5).abs() < 1e-12);
    }
}
