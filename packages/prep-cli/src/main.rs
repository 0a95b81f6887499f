//! Command-line runner for the incident preparation pipeline.
//!
//! Operates over a local directory of CSV files named like the shared
//! store objects: `final_emotion_ensemble.csv`, `main.csv`,
//! `reporter.csv` in; `merged_data.csv`, `manual_prepared.csv`,
//! `ollama_prepared.csv`, `prep.csv` out.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prep::{DirStore, OllamaEnricher, Pipeline, Variant};

#[derive(Parser)]
#[command(name = "prep-cli", about = "Incident-report preparation pipeline")]
struct Cli {
    /// Directory holding the source and output CSV files
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the three source tables and persist the merged table
    Merge,

    /// Merge, prepare the chosen variant, and persist it
    Prepare {
        /// Which preparation pass to run
        #[arg(long, value_enum, default_value_t = VariantArg::Manual)]
        variant: VariantArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Deterministic pass, no external calls
    Manual,

    /// Deterministic pass plus Ollama-assisted category columns
    Ollama,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Manual => Variant::Manual,
            VariantArg::Ollama => Variant::Ollama,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let store = DirStore::new(&cli.data_dir);
    let pipeline = Pipeline::new(store, OllamaEnricher::from_env());

    match cli.command {
        Command::Merge => {
            let merged = pipeline.merge().await?;
            info!(rows = merged.len(), "merge complete");
        }
        Command::Prepare { variant } => {
            let variant: Variant = variant.into();
            let prepared = pipeline.run(variant).await?;
            info!(
                rows = prepared.len(),
                variant = variant.as_str(),
                "preparation complete"
            );
        }
    }

    Ok(())
}
