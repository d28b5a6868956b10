//! Error types for heredity.

use thiserror::Error;

/// Result type alias for heredity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for heredity.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("duplicate person: {name}")]
    DuplicatePerson { name: String },

    #[error("person {person} has exactly one parent; mother and father must both be set or both be blank")]
    SingleParent { person: String },

    #[error("person {person} references unknown parent {parent}")]
    UnknownParent { person: String, parent: String },

    // Input errors (20-29)
    #[error("input error: {0}")]
    Input(String),

    // Inference errors (30-39)
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("degenerate posterior for person {person}")]
    DegeneratePosterior { person: String },

    #[error("hypothesis space for {people} people does not fit in a 64-bit index")]
    HypothesisSpaceTooLarge { people: usize },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidModel(_) => 11,
            Error::DuplicatePerson { .. } => 12,
            Error::SingleParent { .. } => 13,
            Error::UnknownParent { .. } => 14,
            Error::Input(_) => 20,
            Error::Inference(_) => 30,
            Error::DegeneratePosterior { .. } => 31,
            Error::HypothesisSpaceTooLarge { .. } => 32,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Raised while building the population or model, before any inference.
    pub fn is_configuration(&self) -> bool {
        (10..20).contains(&self.code())
    }

    /// Raised by the inference run itself.
    pub fn is_inference(&self) -> bool {
        (30..40).contains(&self.code())
    }
}
