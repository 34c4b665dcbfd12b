//! Withdrawal proof hashes for OP Stack L2→L1 messages.
//!
//! This crate provides:
//! - Decoding of `MessagePassed` logs into [`WithdrawalMessage`]s
//! - The low-level message hash (`Hashing.hashWithdrawal`)
//! - The `sentMessages` storage key used to request a storage proof
//! - Assembly of both hashes with an integrity check against the event
//!
//! Everything here is pure; no RPC access, no shared state.

pub mod decode;
pub mod error;
pub mod hash;
pub mod proof;
pub mod types;

pub use decode::{decode_message_passed, decode_rpc_log};
pub use error::{MalformedLog, WithdrawalError};
pub use hash::{hash_message_slot, hash_withdrawal};
pub use proof::{
    assemble, assemble_message, assemble_receipt_logs, assemble_rpc_log, find_message_passed,
    verify,
};
pub use types::{
    AssembledWithdrawal, ProofHashes, StorageProofRequest, WithdrawalHash, WithdrawalMessage,
};
