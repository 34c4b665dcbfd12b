//! Withdrawal proof-hash CLI.
//!
//! - `assemble`: decode, verify and hash the MessagePassed logs in a file once
//! - `watch`: keep re-assembling a file on an interval until Ctrl-C

use clap::{Parser, Subcommand};
use config::{NetworkType, RollupType};
use prover::{
    assemble_logs,
    config::{Config, LogFormat},
    metrics::{install_prometheus_exporter, Metrics},
    read_logs, wake_on_interval, ProofOutput, ProofWorker,
};
use sleeper::SleeperTask;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prover")]
#[command(about = "Rebuild and verify OP Stack withdrawal proof hashes from MessagePassed logs")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Network override (mainnet or testnet)
    #[arg(long)]
    network: Option<NetworkType>,

    /// Rollup override (unichain or optimism)
    #[arg(long)]
    rollup: Option<RollupType>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble proof hashes for a log, log array or receipt JSON file
    Assemble {
        /// JSON file as returned by eth_getLogs or eth_getTransactionReceipt
        file: PathBuf,
    },

    /// Re-assemble a JSON file every poll interval until interrupted
    Watch {
        /// JSON file as returned by eth_getLogs or eth_getTransactionReceipt
        file: PathBuf,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(rollup) = cli.rollup {
        config.rollup = rollup;
    }

    init_tracing(config.log_format);

    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {}", config.network);
    info!("  Rollup: {} (chain id {})", config.rollup, network.rollup.chain_id);
    info!("  Message passer: {}", network.rollup.message_passer);

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
        info!("  Metrics: 0.0.0.0:{}", port);
    }
    let metrics = Metrics::new();

    match cli.command {
        Command::Assemble { file } => {
            let logs = read_logs(&file).await?;
            let assembled = assemble_logs(&logs, network.rollup.message_passer, &metrics)?;
            info!(count = assembled.len(), "Assembled withdrawals");

            let outputs: Vec<_> = assembled
                .into_iter()
                .map(|withdrawal| ProofOutput::new(withdrawal, network.rollup.message_passer))
                .collect();
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
        Command::Watch { file } => {
            let worker = ProofWorker::new(&file, &network, metrics);
            let task = SleeperTask::with_stop_timeout(worker, config.stop_timeout());
            task.start()?;
            let handle = task.handle();

            info!(
                file = %file.display(),
                interval_secs = config.poll_interval_secs,
                "Watching for withdrawals"
            );

            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!("Shutting down");
            };
            let watched = wake_on_interval(&handle, config.poll_interval(), shutdown).await;

            task.stop().await?;
            watched?;
        }
    }

    Ok(())
}
