//! Configuration types for the withdrawal prover.
//!
//! This crate provides:
//! - Network configurations (mainnet, testnet)
//! - Per-rollup L2ToL1MessagePasser addresses and chain parameters

pub mod network;

pub use network::{
    NetworkConfig, NetworkConfigBuilder, NetworkType, ParseNetworkError, RollupConfig, RollupType,
};
