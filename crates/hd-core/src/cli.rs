//! CLI commands: `infer` and `model show|validate`.
//!
//! Each command returns an [`ExitCode`]; errors are logged and printed to
//! stderr so stdout only ever carries rendered output.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use hd_common::{Error, OutputFormat, Result};
use hd_config::{resolve_model, ModelConfig, ModelSnapshot};
use serde_json::json;
use tracing::{error, info};

use crate::exit_codes::ExitCode;
use crate::infer::{Accumulation, InferenceEngine, InferenceOptions, DEFAULT_CHUNK_SIZE};
use crate::load::load_population;
use crate::output::{render, RunReport};

/// Arguments for the infer command
#[derive(Args, Debug)]
pub struct InferArgs {
    /// Family CSV with columns name,mother,father,trait
    pub data: PathBuf,

    /// Model file (overrides HEREDITY_MODEL and the user config)
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Accumulate in log space (for large families)
    #[arg(long)]
    pub log_space: bool,

    /// Evaluate hypotheses on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Hypotheses per parallel work unit
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: u64,
}

impl InferArgs {
    pub fn options(&self) -> InferenceOptions {
        InferenceOptions {
            accumulation: if self.log_space {
                Accumulation::Log
            } else {
                Accumulation::Linear
            },
            parallel: self.parallel,
            chunk_size: self.chunk_size,
        }
    }
}

/// Arguments for the model command
#[derive(Args, Debug)]
pub struct ModelArgs {
    #[command(subcommand)]
    pub command: ModelCommands,
}

/// Model subcommands
#[derive(Subcommand, Debug)]
pub enum ModelCommands {
    /// Print the model that `infer` would use
    Show {
        /// Model file (overrides HEREDITY_MODEL and the user config)
        #[arg(long, value_name = "PATH")]
        model: Option<PathBuf>,
    },
    /// Check a model file without running inference
    Validate {
        /// Model file to check
        path: PathBuf,
    },
}

pub fn run_infer(format: OutputFormat, args: &InferArgs) -> ExitCode {
    finish(infer_command(format, args))
}

pub fn run_model(format: OutputFormat, args: &ModelArgs) -> ExitCode {
    let result = match &args.command {
        ModelCommands::Show { model } => model_show(format, model.as_deref()),
        ModelCommands::Validate { path } => model_validate(format, path),
    };
    finish(result)
}

fn finish(result: Result<String>) -> ExitCode {
    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::Clean
        }
        Err(err) => {
            let code = ExitCode::from(&err);
            error!(error_code = err.code(), exit_code = code.as_i32(), "{err}");
            eprintln!("heredity: {err}");
            code
        }
    }
}

fn infer_command(format: OutputFormat, args: &InferArgs) -> Result<String> {
    let (model, source) = resolve_model(args.model.as_deref())?;
    info!(source = %source, "model resolved");
    let snapshot = ModelSnapshot::capture(&model, &source)?;

    let population = load_population(&args.data)?;
    info!(
        path = %args.data.display(),
        people = population.len(),
        founders = population.founder_count(),
        observed = population.observed_count(),
        "population loaded"
    );

    let report = InferenceEngine::new(model)?
        .with_options(args.options())
        .run(&population)?;
    info!(
        hypotheses = report.stats.hypotheses,
        elapsed_ms = report.stats.elapsed_ms,
        "inference finished"
    );
    render(format, &RunReport::new(report, snapshot))
}

fn model_show(format: OutputFormat, explicit: Option<&Path>) -> Result<String> {
    let (model, source) = resolve_model(explicit)?;
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "source": source.to_string(),
            "model": model,
        }))?,
        OutputFormat::Text => format!(
            "# source: {source}\n{}",
            serde_json::to_string_pretty(&model)?
        ),
    };
    Ok(out + "\n")
}

fn model_validate(format: OutputFormat, path: &Path) -> Result<String> {
    let model = ModelConfig::from_file(path)
        .and_then(ModelConfig::validated)
        .map_err(Error::from)?;
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "path": path.display().to_string(),
            "valid": true,
            "schema_version": model.schema_version,
        }))?,
        OutputFormat::Text => format!("{}: ok", path.display()),
    };
    Ok(out + "\n")
}
