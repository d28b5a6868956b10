//! Model snapshots recorded alongside run reports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::ModelConfig;
use crate::resolve::ModelSource;

/// Identifies exactly which model produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub source: String,
    pub schema_version: String,
    /// SHA-256 of the canonical JSON serialization of the model.
    pub model_hash: String,
}

impl ModelSnapshot {
    pub fn capture(model: &ModelConfig, source: &ModelSource) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(model)?;
        Ok(Self {
            source: source.to_string(),
            schema_version: model.schema_version.clone(),
            model_hash: sha256_hex(json.as_bytes()),
        })
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
