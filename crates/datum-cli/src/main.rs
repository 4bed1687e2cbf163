//! # datum
//!
//! Command-line driver for the datum validation engine.
//!
//! Reads a JSON upload (one object or an array of objects), runs every record
//! through the pipeline and writes machine-readable results to stdout. Logs go
//! to stderr.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use datum_pipeline::{
    AcceptancePolicy, BatchOutcome, MemoryStore, Pipeline, PipelineConfig, StrictnessLevel,
    read_sources,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "datum")]
#[command(about = "Decode, validate and normalize datum uploads")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an upload and print a per-record report
    Validate {
        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Validate and normalize an upload, writing the accepted records
    Normalize {
        #[command(flatten)]
        process: ProcessArgs,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every registered type and discriminator value
    Variants,
}

#[derive(Args)]
struct ProcessArgs {
    /// Input JSON file
    input: PathBuf,

    /// JSON pointer selecting the records inside the input
    #[arg(short, long)]
    pointer: Option<String>,

    /// Reject records that carry warnings
    #[arg(long)]
    strict: bool,

    /// Batch acceptance policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Report unknown fields as warnings instead of errors
    #[arg(long)]
    allow_unknown_fields: bool,

    /// Records processed at once
    #[arg(long)]
    max_concurrency: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Partial,
    FailAll,
}

impl From<PolicyArg> for AcceptancePolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Partial => Self::Partial,
            PolicyArg::FailAll => Self::FailAll,
        }
    }
}

impl ProcessArgs {
    /// Flags override the config file
    fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if self.strict {
            config.strictness = StrictnessLevel::Strict;
        }
        if let Some(policy) = self.policy {
            config.acceptance_policy = policy.into();
        }
        if self.allow_unknown_fields {
            config.reject_unknown_fields = false;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.max_concurrency = max_concurrency;
        }
        config
    }

    async fn run(&self, pipeline: &Pipeline) -> anyhow::Result<BatchOutcome> {
        let sources = read_sources(&self.input, self.pointer.as_deref())
            .with_context(|| format!("failed to load {}", self.input.display()))?;
        info!(input = %self.input.display(), records = sources.len(), "processing upload");
        Ok(pipeline.process_batch(sources).await?)
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(batch: &BatchOutcome) -> ExitCode {
    if batch.rejected_count() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    init_logging(config.log_level());

    match cli.command {
        Commands::Validate { process } => {
            let pipeline = Pipeline::new(process.apply(config.pipeline))?;
            let batch = process.run(&pipeline).await?;

            println!("{}", serde_json::to_string_pretty(&batch.report())?);
            Ok(exit_code(&batch))
        }
        Commands::Normalize { process, output } => {
            let store = Arc::new(MemoryStore::new());
            let pipeline = Pipeline::new(process.apply(config.pipeline))?.with_store(store);
            let batch = process.run(&pipeline).await?;

            for record in batch.records.iter().filter(|r| !r.is_accepted()) {
                let pointers: Vec<String> = record.result.errors.iter().map(|e| e.pointer()).collect();
                warn!(index = record.index, errors = ?pointers, "record rejected");
            }

            let body = serde_json::to_string_pretty(&batch.committed())?;
            match output {
                Some(path) => std::fs::write(&path, body)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{body}"),
            }
            Ok(exit_code(&batch))
        }
        Commands::Variants => {
            let pipeline = Pipeline::new(config.pipeline)?;
            for (kind, key, values) in pipeline.decoder().variants() {
                for value in values {
                    println!("type={kind} {key}={value}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
