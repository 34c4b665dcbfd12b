use crate::types::WithdrawalHash;
use alloy_primitives::{B256, U256};
use thiserror::Error;

/// Errors produced while turning a `MessagePassed` log into proof hashes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WithdrawalError {
    /// The log does not have the shape of a `MessagePassed` event
    #[error("Malformed MessagePassed log: {0}")]
    MalformedLog(#[from] MalformedLog),

    /// The recomputed withdrawal hash differs from the one in the event
    #[error("Withdrawal hash mismatch: event has {expected}, computed {computed}")]
    IntegrityMismatch {
        expected: WithdrawalHash,
        computed: WithdrawalHash,
    },
}

/// Reasons a log is structurally invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedLog {
    #[error("expected {expected} topics, got {actual}")]
    TopicCount { expected: usize, actual: usize },

    #[error("unexpected event signature {0}")]
    EventSignature(B256),

    #[error("{field} topic is not a right-aligned address: {topic}")]
    AddressPadding { field: &'static str, topic: B256 },

    #[error("data is {actual} bytes, shorter than the {expected} byte head")]
    TruncatedHead { expected: usize, actual: usize },

    #[error("data offset {offset} is outside the {len} byte payload")]
    OffsetOutOfRange { offset: U256, len: usize },

    #[error("data length {length} at offset {offset} exceeds the {len} byte payload")]
    LengthOutOfRange {
        offset: usize,
        length: U256,
        len: usize,
    },
}
