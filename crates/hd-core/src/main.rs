//! heredity: exact gene and trait posteriors for a family tree.

use clap::{Parser, Subcommand};
use hd_common::OutputFormat;
use hd_core::cli::{run_infer, run_model, InferArgs, ModelArgs};
use hd_core::logging;

#[derive(Parser, Debug)]
#[command(name = "heredity", version, about = "Exact gene and trait posteriors for a family tree")]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute posteriors for every person in a family CSV
    Infer(InferArgs),
    /// Inspect or check model files
    Model(ModelArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    let code = match &cli.command {
        Commands::Infer(args) => run_infer(cli.format, args),
        Commands::Model(args) => run_model(cli.format, args),
    };
    std::process::exit(code.as_i32());
}
