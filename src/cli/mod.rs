//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! functions. The default `convert` invocation reproduces the canonical
//! run: train, dev, and test splits under `dataset/` against a local
//! CoreNLP server.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "conllx")]
#[command(about = "Dependency-annotate NER corpora into CoNLL-X via a CoreNLP server")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Convert corpus splits to CoNLL-X with POS tags and dependency parses
    Convert {
        /// Dataset directory containing <split>.conll files
        #[arg(long, default_value = "dataset")]
        dataset_dir: PathBuf,

        /// Convert a single named split instead of train, dev, and test
        #[arg(long)]
        split: Option<String>,

        /// CoreNLP server URL
        #[arg(long, env = "CORENLP_ENDPOINT")]
        endpoint: Option<String>,

        /// Maximum request attempts per sentence
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Check that the CoreNLP server is reachable
    Check {
        /// CoreNLP server URL
        #[arg(long, env = "CORENLP_ENDPOINT")]
        endpoint: Option<String>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            dataset_dir,
            split,
            endpoint,
            max_attempts,
        } => commands::cmd_convert(&dataset_dir, split.as_deref(), endpoint, max_attempts).await,
        Commands::Check { endpoint } => commands::cmd_check(endpoint).await,
    }
}
