//! lexicoach CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lexicoach", version, about = "English answer evaluation and feedback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one answer against the reference dataset
    Evaluate {
        /// Path to the .toml reference dataset
        #[arg(long)]
        dataset: PathBuf,

        /// The question, in English
        #[arg(long)]
        question: String,

        /// The student's answer
        #[arg(long)]
        answer: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a reference dataset file
    Validate {
        /// Path to the .toml reference dataset
        #[arg(long)]
        dataset: PathBuf,
    },

    /// Create a starter dataset file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexicoach_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            dataset,
            question,
            answer,
            format,
        } => commands::evaluate::execute(dataset, question, answer, format),
        Commands::Validate { dataset } => commands::validate::execute(dataset),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
