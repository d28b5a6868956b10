//! Presentation of inference results.
//!
//! Text output lists each person with their gene distribution (two copies
//! first) and trait distribution at four decimals. JSON output wraps the
//! posterior in a [`RunReport`] with run identity, model provenance and
//! statistics.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use hd_common::{OutputFormat, Result, RunId, SCHEMA_VERSION};
use hd_config::ModelSnapshot;
use serde::{Deserialize, Serialize};

use crate::infer::{InferenceReport, InferenceStats};
use crate::posterior::Posterior;

/// Machine-readable record of one inference run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema_version: String,
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    pub model: ModelSnapshot,
    pub stats: InferenceStats,
    pub people: Posterior,
}

impl RunReport {
    pub fn new(report: InferenceReport, model: ModelSnapshot) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            run_id: RunId::new(),
            generated_at: Utc::now(),
            model,
            stats: report.stats,
            people: report.posterior,
        }
    }
}

/// Render the posterior as indented text.
pub fn render_text(posterior: &Posterior) -> String {
    let mut out = String::new();
    for (id, person) in posterior.iter() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{id}:");
        let _ = writeln!(out, "  Gene:");
        for (copies, p) in [(2, person.gene.two), (1, person.gene.one), (0, person.gene.zero)] {
            let _ = writeln!(out, "    {copies}: {p:.4}");
        }
        let _ = writeln!(out, "  Trait:");
        let _ = writeln!(out, "    True: {:.4}", person.traits.present);
        let _ = writeln!(out, "    False: {:.4}", person.traits.absent);
    }
    out
}

/// Render the full run report as pretty JSON.
pub fn render_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render in the requested format.
pub fn render(format: OutputFormat, report: &RunReport) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&report.people)),
        OutputFormat::Json => render_json(report),
    }
}
