pub mod config;
pub mod metrics;

use crate::metrics::Metrics;
use alloy_primitives::Address;
use alloy_rpc_types_eth::Log;
use ::config::NetworkConfig;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use sleeper::{SleeperHandle, Worker};
use std::{
    future::Future,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tokio::{sync::watch, time};
use tracing::{debug, error, info, warn};
use withdrawal::{
    assemble_rpc_log, find_message_passed, AssembledWithdrawal, StorageProofRequest,
    WithdrawalError,
};

/// Shapes of JSON input accepted by the prover: an array of logs, a
/// transaction receipt, or a single log.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LogInput {
    Logs(Vec<Log>),
    Receipt { logs: Vec<Log> },
    Log(Box<Log>),
}

/// Parse logs from the JSON returned by `eth_getLogs` or
/// `eth_getTransactionReceipt`.
pub fn parse_logs(json: &str) -> eyre::Result<Vec<Log>> {
    let input: LogInput =
        serde_json::from_str(json).wrap_err("Input is not a log, a log array or a receipt")?;

    Ok(match input {
        LogInput::Logs(logs) | LogInput::Receipt { logs } => logs,
        LogInput::Log(log) => vec![*log],
    })
}

/// Read and parse a JSON log file.
pub async fn read_logs(path: &Path) -> eyre::Result<Vec<Log>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    parse_logs(&contents)
}

/// Assemble proof hashes for every `MessagePassed` log emitted by
/// `message_passer`.
///
/// Stops at the first malformed or mismatching log.
pub fn assemble_logs(
    logs: &[Log],
    message_passer: Address,
    metrics: &Metrics,
) -> eyre::Result<Vec<AssembledWithdrawal>> {
    let candidates = find_message_passed(logs, message_passer);
    debug!(
        total_logs = logs.len(),
        message_passed = candidates.len(),
        %message_passer,
        "Selected MessagePassed logs"
    );

    let mut assembled = Vec::with_capacity(candidates.len());
    for log in candidates {
        match assemble_rpc_log(log) {
            Ok(withdrawal) => {
                metrics.record_assembled();
                assembled.push(withdrawal);
            }
            Err(e) => {
                match e {
                    WithdrawalError::IntegrityMismatch { .. } => {
                        metrics.record_integrity_mismatch()
                    }
                    WithdrawalError::MalformedLog(_) => metrics.record_malformed(),
                }
                return Err(e).wrap_err_with(|| {
                    format!(
                        "Rejected MessagePassed log (tx: {:?}, log index: {:?})",
                        log.transaction_hash, log.log_index
                    )
                });
            }
        }
    }

    Ok(assembled)
}

/// What the prover prints for each withdrawal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOutput {
    #[serde(flatten)]
    pub withdrawal: AssembledWithdrawal,
    pub storage_proof: StorageProofRequest,
}

impl ProofOutput {
    pub fn new(withdrawal: AssembledWithdrawal, message_passer: Address) -> Self {
        let storage_proof = withdrawal.storage_proof_request_at(message_passer);
        Self {
            withdrawal,
            storage_proof,
        }
    }
}

/// Wake `handle` every `period` until `shutdown` resolves.
///
/// Fails as soon as the task refuses a wake-up, e.g. after its worker
/// panicked.
pub async fn wake_on_interval(
    handle: &SleeperHandle,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) -> eyre::Result<()> {
    let mut interval = time::interval(period);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => return Ok(()),
            _ = interval.tick() => handle.wake_up()?,
        }
    }
}

/// Worker that re-assembles the withdrawals found in a log file.
///
/// Running it again when the file has not changed yields the same hashes.
#[derive(Debug)]
pub struct ProofWorker {
    name: String,
    path: PathBuf,
    message_passer: Address,
    metrics: Metrics,
    latest: watch::Sender<Option<Vec<AssembledWithdrawal>>>,
}

impl ProofWorker {
    pub fn new(path: impl Into<PathBuf>, network: &NetworkConfig, metrics: Metrics) -> Self {
        let path = path.into();
        let (latest, _) = watch::channel(None);
        Self {
            name: format!("proof-{}", path.display()),
            path,
            message_passer: network.rollup.message_passer,
            metrics,
            latest,
        }
    }

    /// Results of the most recent successful run.
    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<AssembledWithdrawal>>> {
        self.latest.subscribe()
    }

    pub async fn run_once(&self) -> eyre::Result<Vec<AssembledWithdrawal>> {
        let logs = read_logs(&self.path).await?;
        assemble_logs(&logs, self.message_passer, &self.metrics)
    }
}

impl Worker for ProofWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn work(&self) {
        let started = Instant::now();

        match self.run_once().await {
            Ok(assembled) => {
                if assembled.is_empty() {
                    warn!(path = %self.path.display(), "No MessagePassed logs found");
                }
                for withdrawal in &assembled {
                    info!(
                        nonce = %withdrawal.message.nonce,
                        low_level_hash = %withdrawal.hashes.low_level_hash,
                        message_slot_hash = %withdrawal.hashes.message_slot_hash,
                        "Withdrawal proof hashes ready"
                    );
                }
                self.latest.send_replace(Some(assembled));
            }
            Err(e) => {
                error!(path = %self.path.display(), error = ?e, "Proof worker run failed");
            }
        }

        self.metrics
            .record_task_execution(&self.name, started.elapsed());
    }
}
