//! Decoding of raw `MessagePassed` logs.
//!
//! The event has one fixed shape, so the layout is read directly instead of
//! going through a generic ABI decoder:
//!
//! ```text
//! topics: [signature, nonce, sender, target]
//! data:   value | gasLimit | offset(data) | withdrawalHash | len(data) | data...
//! ```

use crate::{
    error::{MalformedLog, WithdrawalError},
    types::WithdrawalMessage,
};
use alloy_primitives::{Address, Bytes, LogData, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use binding::opstack::IL2ToL1MessagePasser::MessagePassed;
use tracing::debug;

const WORD: usize = 32;
const TOPIC_COUNT: usize = 4;
const ADDRESS_PADDING: usize = WORD - 20;
/// value, gasLimit, offset of `data`, withdrawalHash
const HEAD_LEN: usize = 4 * WORD;

/// Decode a `MessagePassed` log into a [`WithdrawalMessage`].
///
/// The embedded withdrawal hash is returned as-is; checking it against the
/// message fields is the job of [`crate::proof::verify`].
pub fn decode_message_passed(log: &LogData) -> Result<WithdrawalMessage, WithdrawalError> {
    let topics = log.topics();
    if topics.len() != TOPIC_COUNT {
        return Err(MalformedLog::TopicCount {
            expected: TOPIC_COUNT,
            actual: topics.len(),
        }
        .into());
    }
    if topics[0] != MessagePassed::SIGNATURE_HASH {
        return Err(MalformedLog::EventSignature(topics[0]).into());
    }

    let nonce = U256::from_be_bytes(topics[1].0);
    let sender = topic_address("sender", topics[2])?;
    let target = topic_address("target", topics[3])?;

    let payload: &[u8] = log.data.as_ref();
    if payload.len() < HEAD_LEN {
        return Err(MalformedLog::TruncatedHead {
            expected: HEAD_LEN,
            actual: payload.len(),
        }
        .into());
    }

    let value = U256::from_be_slice(&payload[0..WORD]);
    let gas_limit = U256::from_be_slice(&payload[WORD..2 * WORD]);
    let data_offset = U256::from_be_slice(&payload[2 * WORD..3 * WORD]);
    let withdrawal_hash = B256::from_slice(&payload[3 * WORD..HEAD_LEN]);
    let data = dynamic_bytes(payload, data_offset)?;

    debug!(
        %nonce,
        %sender,
        %target,
        %withdrawal_hash,
        data_len = data.len(),
        "Decoded MessagePassed log"
    );

    Ok(WithdrawalMessage {
        nonce,
        sender,
        target,
        value,
        gas_limit,
        data,
        withdrawal_hash,
    })
}

/// Decode a `MessagePassed` log as returned by `eth_getLogs` or a receipt.
pub fn decode_rpc_log(log: &Log) -> Result<WithdrawalMessage, WithdrawalError> {
    decode_message_passed(&log.inner.data)
}

/// Indexed addresses are left-padded with 12 zero bytes.
fn topic_address(field: &'static str, topic: B256) -> Result<Address, MalformedLog> {
    if topic[..ADDRESS_PADDING].iter().any(|b| *b != 0) {
        return Err(MalformedLog::AddressPadding { field, topic });
    }
    Ok(Address::from_word(topic))
}

/// Read a length-prefixed `bytes` value located at `offset` in the payload.
fn dynamic_bytes(payload: &[u8], offset: U256) -> Result<Bytes, MalformedLog> {
    let len = payload.len();

    let start = usize::try_from(offset)
        .ok()
        .filter(|start| start.checked_add(WORD).is_some_and(|end| end <= len))
        .ok_or(MalformedLog::OffsetOutOfRange { offset, len })?;

    let length = U256::from_be_slice(&payload[start..start + WORD]);
    let content_start = start + WORD;

    // Trailing zero padding after the content is not required.
    let content = usize::try_from(length)
        .ok()
        .and_then(|n| content_start.checked_add(n))
        .filter(|end| *end <= len)
        .map(|end| &payload[content_start..end])
        .ok_or(MalformedLog::LengthOutOfRange {
            offset: start,
            length,
            len,
        })?;

    Ok(Bytes::copy_from_slice(content))
}
