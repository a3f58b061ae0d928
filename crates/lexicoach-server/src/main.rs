//! lexicoach-server — JSON API for English answer evaluation.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use lexicoach_core::engine::Evaluator;
use lexicoach_server::{serve, AppState};

#[derive(Parser)]
#[command(name = "lexicoach-server", version, about = "English answer evaluation API")]
struct Args {
    /// Path to the reference dataset (TOML)
    #[arg(long, default_value = "datasets/english-basics.toml")]
    dataset: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexicoach_core=info".parse().unwrap())
                .add_directive("lexicoach_server=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    // Dataset load + classifier fit happen before the listener binds, so
    // the first accepted request already sees the frozen state.
    let evaluator = Evaluator::from_dataset_path(&args.dataset);
    let state = Arc::new(AppState { evaluator });

    if let Err(e) = serve(state, &args.addr).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
