use alloy_primitives::{Address, Bytes, B256, U256};
use binding::opstack::{WithdrawalTransaction, MESSAGE_PASSER_ADDRESS};
use serde::{Deserialize, Serialize};

pub type WithdrawalHash = B256;

/// Number of low bits of the nonce that hold the sequence number. The
/// remaining top 16 bits hold the message version.
const NONCE_SEQUENCE_BITS: usize = 240;

/// A decoded `MessagePassed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalMessage {
    /// Versioned nonce: version in the top 2 bytes, sequence number below
    pub nonce: U256,
    /// L2 contract that sent the message
    pub sender: Address,
    /// L1 contract the message is destined for
    pub target: Address,
    /// ETH value carried by the withdrawal (may be zero)
    pub value: U256,
    /// Minimum gas to forward to `target` on L1
    pub gas_limit: U256,
    /// Calldata to execute on `target`
    pub data: Bytes,
    /// Hash embedded in the event. Must match the recomputed hash.
    pub withdrawal_hash: WithdrawalHash,
}

impl WithdrawalMessage {
    /// Message version encoded in the top two bytes of the nonce.
    pub fn version(&self) -> u16 {
        let version: U256 = self.nonce >> NONCE_SEQUENCE_BITS;
        version.to::<u16>()
    }

    /// Sequence number encoded in the lower 240 bits of the nonce.
    pub fn sequence(&self) -> U256 {
        let mask = (U256::from(1) << NONCE_SEQUENCE_BITS) - U256::from(1);
        self.nonce & mask
    }

    /// The withdrawal as the portal contract expects it in
    /// `proveWithdrawalTransaction` / `finalizeWithdrawalTransaction`.
    pub fn transaction(&self) -> WithdrawalTransaction {
        WithdrawalTransaction {
            nonce: self.nonce,
            sender: self.sender,
            target: self.target,
            value: self.value,
            gasLimit: self.gas_limit,
            data: self.data.clone(),
        }
    }
}

/// The two hashes the storage-proof builder needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofHashes {
    /// `Hashing.hashWithdrawal` of the six message fields
    pub low_level_hash: WithdrawalHash,
    /// Storage key of `sentMessages[low_level_hash]`
    pub message_slot_hash: B256,
}

/// Storage proof to request (via `eth_getProof`) for a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProofRequest {
    pub account: Address,
    pub storage_key: B256,
}

/// A decoded and verified withdrawal with its proof hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledWithdrawal {
    pub message: WithdrawalMessage,
    pub hashes: ProofHashes,
}

impl AssembledWithdrawal {
    /// Storage proof request against the canonical message passer predeploy.
    pub const fn storage_proof_request(&self) -> StorageProofRequest {
        self.storage_proof_request_at(MESSAGE_PASSER_ADDRESS)
    }

    /// Storage proof request against a custom message passer deployment.
    pub const fn storage_proof_request_at(&self, message_passer: Address) -> StorageProofRequest {
        StorageProofRequest {
            account: message_passer,
            storage_key: self.hashes.message_slot_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    fn message(nonce: U256) -> WithdrawalMessage {
        WithdrawalMessage {
            nonce,
            sender: address!("0x4200000000000000000000000000000000000007"),
            target: address!("0x58Cc85b8D04EA49cC6DBd3CbFFd00B4B8D6cb3ef"),
            value: U256::ZERO,
            gas_limit: U256::from(289_160),
            data: Bytes::new(),
            withdrawal_hash: B256::ZERO,
        }
    }

    #[test]
    fn test_versioned_nonce() {
        // Version 1, sequence 1460 (Sepolia OP MessagePassed event)
        let nonce = U256::from_be_bytes(
            b256!("0x00010000000000000000000000000000000000000000000000000000000005b4").0,
        );
        let msg = message(nonce);
        assert_eq!(msg.version(), 1);
        assert_eq!(msg.sequence(), U256::from(1460));
    }

    #[test]
    fn test_legacy_nonce_has_version_zero() {
        let msg = message(U256::from(42));
        assert_eq!(msg.version(), 0);
        assert_eq!(msg.sequence(), U256::from(42));
    }

    #[test]
    fn test_transaction_conversion() {
        let msg = message(U256::from(7));
        let tx = msg.transaction();
        assert_eq!(tx.nonce, msg.nonce);
        assert_eq!(tx.sender, msg.sender);
        assert_eq!(tx.target, msg.target);
        assert_eq!(tx.gasLimit, msg.gas_limit);
        assert_eq!(tx.data, msg.data);
    }

    #[test]
    fn test_storage_proof_request_uses_predeploy() {
        let assembled = AssembledWithdrawal {
            message: message(U256::from(1)),
            hashes: ProofHashes {
                low_level_hash: B256::repeat_byte(0x11),
                message_slot_hash: B256::repeat_byte(0x22),
            },
        };
        let request = assembled.storage_proof_request();
        assert_eq!(request.account, MESSAGE_PASSER_ADDRESS);
        assert_eq!(request.storage_key, B256::repeat_byte(0x22));
    }
}
