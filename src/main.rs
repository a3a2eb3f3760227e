mod analyzer;
mod config;
mod model;
mod provider;
mod report;

use std::collections::HashSet;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use analyzer::PulseAnalyzer;
use config::load_config;
use provider::HttpRpcProvider;

#[derive(Parser, Debug)]
#[command(
    name = "chainsonar",
    about = "Analyzes the activity pulse of a smart contract over recent blocks",
    version
)]
struct Args {
    /// Contract address to analyze
    contract: String,

    /// Number of most recent blocks to scan
    #[arg(short, long, default_value_t = 1000)]
    blocks: u64,

    /// JSON-RPC endpoint (overrides CHAINSONAR_RPC_URL)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "chainsonar=debug"
    } else {
        "chainsonar=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = match load_config(args.rpc_url) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let provider = match HttpRpcProvider::connect(&config.rpc_url).await {
        Ok(p) => p,
        Err(e) => {
            error!("Could not connect to the RPC endpoint: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Connected to {}", config.rpc_url);

    // No sender history is persisted yet, so every active wallet in the
    // window counts as newly discovered.
    let known_senders = HashSet::new();

    let analyzer = PulseAnalyzer::new();
    match analyzer
        .scan(&provider, &args.contract, args.blocks, &known_senders)
        .await
    {
        Ok(result) => {
            report::render(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scan failed: {e}");
            ExitCode::FAILURE
        }
    }
}
