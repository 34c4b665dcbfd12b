//! Network configuration for withdrawal proving.
//!
//! Provides chain-specific addresses and parameters for the OP Stack rollups
//! we prove withdrawals from (mainnet, testnet).

use alloy_primitives::Address;
use binding::opstack::MESSAGE_PASSER_ADDRESS;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Network type (mainnet or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

/// OP Stack rollup family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollupType {
    Unichain,
    Optimism,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseNetworkError {
    kind: &'static str,
    value: String,
}

impl FromStr for NetworkType {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" | "sepolia" => Ok(Self::Testnet),
            _ => Err(ParseNetworkError {
                kind: "network",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for RollupType {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unichain" => Ok(Self::Unichain),
            "optimism" | "op" => Ok(Self::Optimism),
            _ => Err(ParseNetworkError {
                kind: "rollup",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

impl fmt::Display for RollupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unichain => write!(f, "unichain"),
            Self::Optimism => write!(f, "optimism"),
        }
    }
}

/// L2 rollup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupConfig {
    /// Chain ID
    pub chain_id: u64,
    /// L2ToL1MessagePasser address (OP Stack predeploy)
    pub message_passer: Address,
    /// Block time in seconds
    pub block_time_secs: u64,
}

impl RollupConfig {
    /// Unichain mainnet configuration.
    pub const fn unichain_mainnet() -> Self {
        Self {
            chain_id: 130,
            message_passer: MESSAGE_PASSER_ADDRESS,
            block_time_secs: 1,
        }
    }

    /// Unichain Sepolia testnet configuration.
    pub const fn unichain_sepolia() -> Self {
        Self {
            chain_id: 1301,
            message_passer: MESSAGE_PASSER_ADDRESS,
            block_time_secs: 1,
        }
    }

    /// OP mainnet configuration.
    pub const fn op_mainnet() -> Self {
        Self {
            chain_id: 10,
            message_passer: MESSAGE_PASSER_ADDRESS,
            block_time_secs: 2,
        }
    }

    /// OP Sepolia testnet configuration.
    pub const fn op_sepolia() -> Self {
        Self {
            chain_id: 11155420,
            message_passer: MESSAGE_PASSER_ADDRESS,
            block_time_secs: 2,
        }
    }

    /// Preset for a rollup family on a network.
    pub const fn preset(rollup: RollupType, network_type: NetworkType) -> Self {
        match (rollup, network_type) {
            (RollupType::Unichain, NetworkType::Mainnet) => Self::unichain_mainnet(),
            (RollupType::Unichain, NetworkType::Testnet) => Self::unichain_sepolia(),
            (RollupType::Optimism, NetworkType::Mainnet) => Self::op_mainnet(),
            (RollupType::Optimism, NetworkType::Testnet) => Self::op_sepolia(),
        }
    }
}

/// Complete network configuration for withdrawal proving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type (mainnet or testnet)
    pub network_type: NetworkType,
    /// Rollup family
    pub rollup_type: RollupType,
    /// L2 configuration
    pub rollup: RollupConfig,
}

impl NetworkConfig {
    /// Create mainnet configuration (Unichain).
    pub const fn mainnet() -> Self {
        Self::from_network_type(NetworkType::Mainnet)
    }

    /// Create testnet (Sepolia) configuration (Unichain).
    pub const fn sepolia() -> Self {
        Self::from_network_type(NetworkType::Testnet)
    }

    /// Create configuration from network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        Self::preset(RollupType::Unichain, network_type)
    }

    /// Create configuration for a rollup family on a network.
    pub const fn preset(rollup_type: RollupType, network_type: NetworkType) -> Self {
        Self {
            network_type,
            rollup_type,
            rollup: RollupConfig::preset(rollup_type, network_type),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start with mainnet defaults.
    pub const fn mainnet() -> Self {
        Self {
            config: NetworkConfig::mainnet(),
        }
    }

    /// Start with testnet defaults.
    pub const fn testnet() -> Self {
        Self {
            config: NetworkConfig::sepolia(),
        }
    }

    /// Start from a rollup preset.
    pub const fn preset(rollup_type: RollupType, network_type: NetworkType) -> Self {
        Self {
            config: NetworkConfig::preset(rollup_type, network_type),
        }
    }

    /// Override the L2ToL1MessagePasser address.
    pub const fn message_passer(mut self, address: Address) -> Self {
        self.config.rollup.message_passer = address;
        self
    }

    /// Override the L2 chain ID.
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.rollup.chain_id = chain_id;
        self
    }

    /// Build the network configuration.
    pub const fn build(self) -> NetworkConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_mainnet_config() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.rollup.chain_id, 130);
        assert_eq!(config.rollup_type, RollupType::Unichain);
        assert_eq!(config.network_type, NetworkType::Mainnet);
        assert_eq!(config.rollup.message_passer, MESSAGE_PASSER_ADDRESS);
    }

    #[test]
    fn test_sepolia_config() {
        let config = NetworkConfig::sepolia();
        assert_eq!(config.rollup.chain_id, 1301);
        assert_eq!(config.network_type, NetworkType::Testnet);
    }

    #[test]
    fn test_op_presets() {
        let config = NetworkConfig::preset(RollupType::Optimism, NetworkType::Testnet);
        assert_eq!(config.rollup.chain_id, 11155420);
        assert_eq!(
            NetworkConfig::preset(RollupType::Optimism, NetworkType::Mainnet)
                .rollup
                .chain_id,
            10
        );
    }

    #[test]
    fn test_custom_config_builder() {
        let custom = address!("1111111111111111111111111111111111111111");

        let config = NetworkConfigBuilder::mainnet()
            .message_passer(custom)
            .chain_id(31337)
            .build();

        assert_eq!(config.rollup.message_passer, custom);
        assert_eq!(config.rollup.chain_id, 31337);
        assert_eq!(config.network_type, NetworkType::Mainnet);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Mainnet".parse::<NetworkType>(), Ok(NetworkType::Mainnet));
        assert_eq!("sepolia".parse::<NetworkType>(), Ok(NetworkType::Testnet));
        assert_eq!("op".parse::<RollupType>(), Ok(RollupType::Optimism));
        assert!("devnet".parse::<NetworkType>().is_err());
        assert_eq!(NetworkType::Testnet.to_string(), "testnet");
    }
}
