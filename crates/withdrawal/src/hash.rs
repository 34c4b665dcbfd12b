use crate::types::WithdrawalHash;
use alloy_primitives::{keccak256, B256};
use alloy_sol_types::SolValue;
use binding::opstack::{WithdrawalTransaction, SENT_MESSAGES_SLOT};

/// Compute the low-level message hash of a withdrawal.
pub fn hash_withdrawal(tx: &WithdrawalTransaction) -> WithdrawalHash {
    // Solidity's Hashing.hashWithdrawal uses:
    // keccak256(abi.encode(_tx.nonce, _tx.sender, _tx.target, _tx.value, _tx.gasLimit, _tx.data))
    // abi_encode_sequence encodes the fields directly, without a wrapping tuple offset
    let encoded = (
        &tx.nonce,
        &tx.sender,
        &tx.target,
        &tx.value,
        &tx.gasLimit,
        &tx.data,
    )
        .abi_encode_sequence();

    keccak256(encoded)
}

/// Compute the storage key of `sentMessages[withdrawal_hash]` in the
/// L2ToL1MessagePasser.
///
/// Solidity mapping slot = keccak256(abi.encode(key, base_slot)).
pub fn hash_message_slot(withdrawal_hash: WithdrawalHash) -> B256 {
    let encoded = (withdrawal_hash, SENT_MESSAGES_SLOT).abi_encode_sequence();
    keccak256(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sepolia_message, SEPOLIA_SLOT_HASH, SEPOLIA_WITHDRAWAL_HASH};
    use alloy_primitives::{hex, Address, Bytes, U256};

    fn base_tx() -> WithdrawalTransaction {
        WithdrawalTransaction {
            nonce: U256::from(100),
            sender: Address::from([0x01; 20]),
            target: Address::from([0x02; 20]),
            value: U256::from(1_000_000),
            gasLimit: U256::from(100_000),
            data: Bytes::from(vec![0xaa, 0xbb, 0xcc]),
        }
    }

    #[test]
    fn test_hash_withdrawal_deterministic() {
        let tx = base_tx();

        let hash1 = hash_withdrawal(&tx);
        let hash2 = hash_withdrawal(&tx);

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, B256::ZERO);
    }

    #[test]
    fn test_hash_withdrawal_sepolia_vector() {
        // Sepolia OP tx: 0x14e41dac648d2e1c166ca5c44af09c7c1da684b994ae74dc11303b1ac4bd057c
        let tx = sepolia_message().transaction();
        assert_eq!(hash_withdrawal(&tx), SEPOLIA_WITHDRAWAL_HASH);
    }

    #[test]
    fn test_hash_withdrawal_unichain_vector() {
        // Unichain Mainnet TX: 0x91b374b5403401198a892f62db8843b60125cfb3e28ec1664089d9158424dc4a
        let tx = WithdrawalTransaction {
            nonce: U256::from_be_bytes(hex!(
                "0001000000000000000000000000000000000000000000000000000000000818"
            )),
            sender: Address::from_slice(&hex!("000040D6c85A13a1AA74565FDe87e499dC023C6f")),
            target: Address::from_slice(&hex!("B03eEF386A61b5b462051636001485FFfdD3d843")),
            value: U256::ZERO,
            gasLimit: U256::from(200_000),
            data: Bytes::from(hex!(
                "095ea7b3000000000000000000000000000040d6c85a13a1aa74565fde87e499dc023c6fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            )),
        };

        let expected = B256::from_slice(&hex!(
            "49c43b60ec99e99046b54aec4c90419ff194300e567de63423c3b974ae46bd28"
        ));
        assert_eq!(hash_withdrawal(&tx), expected);
    }

    #[test]
    fn test_hash_withdrawal_layout() {
        // Empty data: 5 static words + offset word (0xc0) + zero length word
        let tx = WithdrawalTransaction {
            data: Bytes::new(),
            ..base_tx()
        };

        let mut manual = Vec::with_capacity(7 * 32);
        manual.extend_from_slice(&tx.nonce.to_be_bytes::<32>());
        manual.extend_from_slice(tx.sender.into_word().as_slice());
        manual.extend_from_slice(tx.target.into_word().as_slice());
        manual.extend_from_slice(&tx.value.to_be_bytes::<32>());
        manual.extend_from_slice(&tx.gasLimit.to_be_bytes::<32>());
        manual.extend_from_slice(&U256::from(0xc0).to_be_bytes::<32>());
        manual.extend_from_slice(&[0u8; 32]);

        assert_eq!(hash_withdrawal(&tx), keccak256(manual));
    }

    #[test]
    fn test_every_field_changes_hash() {
        let base = hash_withdrawal(&base_tx());

        let variants = [
            WithdrawalTransaction {
                nonce: U256::from(101),
                ..base_tx()
            },
            WithdrawalTransaction {
                sender: Address::from([0x03; 20]),
                ..base_tx()
            },
            WithdrawalTransaction {
                target: Address::from([0x04; 20]),
                ..base_tx()
            },
            WithdrawalTransaction {
                value: U256::from(1_000_001),
                ..base_tx()
            },
            WithdrawalTransaction {
                gasLimit: U256::from(100_001),
                ..base_tx()
            },
            WithdrawalTransaction {
                data: Bytes::from(vec![0xaa, 0xbb, 0xcd]),
                ..base_tx()
            },
        ];

        for tx in &variants {
            assert_ne!(hash_withdrawal(tx), base, "{tx:?} hashed like the base tx");
        }
    }

    #[test]
    fn test_swapped_addresses_change_hash() {
        let tx = base_tx();
        let swapped = WithdrawalTransaction {
            sender: tx.target,
            target: tx.sender,
            ..base_tx()
        };
        assert_ne!(hash_withdrawal(&tx), hash_withdrawal(&swapped));
    }

    #[test]
    fn test_hash_message_slot_sepolia_vector() {
        assert_eq!(hash_message_slot(SEPOLIA_WITHDRAWAL_HASH), SEPOLIA_SLOT_HASH);
    }

    #[test]
    fn test_hash_message_slot_format() {
        // keccak256(withdrawalHash || 0x00...00)
        let withdrawal_hash = B256::repeat_byte(0x12);
        let mut data = [0u8; 64];
        data[..32].copy_from_slice(withdrawal_hash.as_slice());

        assert_eq!(hash_message_slot(withdrawal_hash), keccak256(data));
        assert_ne!(
            hash_message_slot(withdrawal_hash),
            hash_message_slot(B256::repeat_byte(0x13))
        );
    }
}
