//! Semantic validation for model files.
//!
//! The engine never renormalizes caller-supplied tables: a gene prior or a
//! trait-likelihood row that does not sum to one is rejected here.

use crate::model::ModelConfig;
use hd_common::GeneCount;
use thiserror::Error;

/// Allowed deviation from 1.0 when checking that a table sums to one.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Upper bound on the mutation probability.
pub const MAX_MUTATION: f64 = 0.5;

/// Errors raised while loading or validating a model.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("unsupported schema version {found} (supported major: {supported})")]
    UnsupportedSchema { found: String, supported: String },

    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for hd_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => hd_common::Error::Config(msg),
            other => hd_common::Error::InvalidModel(other.to_string()),
        }
    }
}

/// Check every constraint on a model, returning the first violation.
pub fn validate_model(model: &ModelConfig) -> ValidationResult<()> {
    if !hd_common::schema::is_compatible(&model.schema_version) {
        return Err(ValidationError::UnsupportedSchema {
            found: model.schema_version.clone(),
            supported: crate::CONFIG_SCHEMA_VERSION.to_string(),
        });
    }

    for genes in GeneCount::ALL {
        check_probability(model.gene_prior(genes), &format!("gene_prior.{}", field_name(genes)))?;
    }
    check_sums_to_one(model.gene_prior.sum(), "gene_prior")?;

    for genes in GeneCount::ALL {
        let row = model.trait_likelihood.get(genes);
        let field = format!("trait_likelihood.{}", field_name(genes));
        check_probability(row.present, &format!("{field}.present"))?;
        check_probability(row.absent, &format!("{field}.absent"))?;
        check_sums_to_one(row.sum(), &field)?;
    }

    if !model.mutation.is_finite() || !(0.0..=MAX_MUTATION).contains(&model.mutation) {
        return Err(ValidationError::Invalid {
            field: "mutation".to_string(),
            message: format!("must be in [0, {MAX_MUTATION}], got {}", model.mutation),
        });
    }

    Ok(())
}

fn field_name(genes: GeneCount) -> &'static str {
    match genes {
        GeneCount::Zero => "zero",
        GeneCount::One => "one",
        GeneCount::Two => "two",
    }
}

fn check_probability(value: f64, field: &str) -> ValidationResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field: field.to_string(),
            message: format!("must be a probability in [0, 1], got {value}"),
        })
    }
}

fn check_sums_to_one(sum: f64, field: &str) -> ValidationResult<()> {
    if (sum - 1.0).abs() <= SUM_TOLERANCE {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field: field.to_string(),
            message: format!("entries must sum to 1 (±{SUM_TOLERANCE}), got {sum}"),
        })
    }
}
