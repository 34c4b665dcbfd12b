//! Proof-hash assembly for L2→L1 withdrawals.
//!
//! Turns a raw `MessagePassed` log into the two hashes an external storage
//! proof builder needs:
//! 1. Decodes the log into a [`WithdrawalMessage`]
//! 2. Recomputes the low-level message hash and checks it against the event
//! 3. Derives the `sentMessages` storage key from the verified hash
//!
//! A mismatch in step 2 is always an error. It means either a decoding bug or
//! a forged log, and the withdrawal must not go any further.

use crate::{
    decode::{decode_message_passed, decode_rpc_log},
    error::WithdrawalError,
    hash::{hash_message_slot, hash_withdrawal},
    types::{AssembledWithdrawal, ProofHashes, WithdrawalHash, WithdrawalMessage},
};
use alloy_primitives::{Address, LogData};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use binding::opstack::IL2ToL1MessagePasser::MessagePassed;
use tracing::{debug, error};

/// Decode, verify and hash a `MessagePassed` log.
pub fn assemble(log: &LogData) -> Result<AssembledWithdrawal, WithdrawalError> {
    let message = decode_message_passed(log)?;
    assemble_message(message)
}

/// Same as [`assemble`] for an RPC-shaped log.
pub fn assemble_rpc_log(log: &Log) -> Result<AssembledWithdrawal, WithdrawalError> {
    let message = decode_rpc_log(log)?;
    assemble_message(message)
}

/// Verify an already decoded message and derive its proof hashes.
pub fn assemble_message(message: WithdrawalMessage) -> Result<AssembledWithdrawal, WithdrawalError> {
    let low_level_hash = verify(&message)?;
    let message_slot_hash = hash_message_slot(low_level_hash);

    debug!(
        %low_level_hash,
        %message_slot_hash,
        nonce = %message.nonce,
        "Assembled withdrawal proof hashes"
    );

    Ok(AssembledWithdrawal {
        message,
        hashes: ProofHashes {
            low_level_hash,
            message_slot_hash,
        },
    })
}

/// Recompute the withdrawal hash and check it against the one in the event.
///
/// Returns the verified hash.
pub fn verify(message: &WithdrawalMessage) -> Result<WithdrawalHash, WithdrawalError> {
    let computed = hash_withdrawal(&message.transaction());
    if computed != message.withdrawal_hash {
        error!(
            nonce = %message.nonce,
            computed_hash = %computed,
            withdrawal_hash = %message.withdrawal_hash,
            "Withdrawal hash mismatch"
        );
        return Err(WithdrawalError::IntegrityMismatch {
            expected: message.withdrawal_hash,
            computed,
        });
    }
    Ok(computed)
}

/// Select the `MessagePassed` logs emitted by `message_passer` from a
/// receipt's logs.
pub fn find_message_passed(logs: &[Log], message_passer: Address) -> Vec<&Log> {
    logs.iter()
        .filter(|log| {
            log.inner.address == message_passer
                && log.inner.data.topics().first() == Some(&MessagePassed::SIGNATURE_HASH)
        })
        .collect()
}

/// Assemble every `MessagePassed` log emitted by `message_passer`.
///
/// Fails on the first malformed or mismatching log; nothing is skipped.
pub fn assemble_receipt_logs(
    logs: &[Log],
    message_passer: Address,
) -> Result<Vec<AssembledWithdrawal>, WithdrawalError> {
    find_message_passed(logs, message_passer)
        .into_iter()
        .map(assemble_rpc_log)
        .collect()
}
