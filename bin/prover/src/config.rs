use alloy_primitives::Address;
use config::{NetworkConfig, NetworkConfigBuilder, NetworkType, RollupType};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Top-level prover configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network (mainnet or testnet)
    pub network: NetworkType,

    /// Rollup family the logs come from
    pub rollup: RollupType,

    /// Override for the L2ToL1MessagePasser address (defaults to the predeploy)
    pub message_passer_address: Option<Address>,

    /// How often `watch` wakes the proof worker
    pub poll_interval_secs: u64,

    /// How long to wait for the proof worker to stop on shutdown
    pub stop_timeout_secs: u64,

    /// Prometheus exporter port; no exporter when unset
    pub metrics_port: Option<u16>,

    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkType::Testnet,
            rollup: RollupType::Unichain,
            message_passer_address: None,
            poll_interval_secs: 12,
            stop_timeout_secs: 15,
            metrics_port: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn network_config(&self) -> NetworkConfig {
        let builder = NetworkConfigBuilder::preset(self.rollup, self.network);
        match self.message_passer_address {
            Some(address) => builder.message_passer(address).build(),
            None => builder.build(),
        }
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub const fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }
}
