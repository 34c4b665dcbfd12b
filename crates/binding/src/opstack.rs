//! OP Stack contract bindings.
//!
//! Includes the pieces of the L2→L1 withdrawal path that the proof-hash
//! pipeline needs:
//! - L2ToL1MessagePasser (L2 predeploy) and its `MessagePassed` event
//! - WithdrawalTransaction (the struct hashed by `Hashing.hashWithdrawal`)

use alloy_primitives::{address, Address, U256};
use alloy_sol_types::sol;

/// L2ToL1MessagePasser predeploy address (identical on all OP Stack chains).
pub const MESSAGE_PASSER_ADDRESS: Address = address!("0x4200000000000000000000000000000000000016");

/// Storage slot of `mapping(bytes32 => bool) public sentMessages` in the
/// L2ToL1MessagePasser. It is the first declared storage variable.
pub const SENT_MESSAGES_SLOT: U256 = U256::ZERO;

sol! {
    /// L2ToL1MessagePasser - L2 predeploy contract for initiating withdrawals
    /// Address: 0x4200000000000000000000000000000000000016 (on all OP Stack chains)
    interface IL2ToL1MessagePasser {
        /// Emitted when a withdrawal is initiated on L2
        event MessagePassed(
            uint256 indexed nonce,
            address indexed sender,
            address indexed target,
            uint256 value,
            uint256 gasLimit,
            bytes data,
            bytes32 withdrawalHash
        );

        /// Check if a withdrawal message has been sent
        function sentMessages(bytes32) external view returns (bool);

        /// Get the current message nonce (with version encoded in top 2 bytes)
        function messageNonce() external view returns (uint256);
    }

    /// Withdrawal transaction structure (shared across contracts)
    #[derive(Debug, PartialEq, Eq)]
    struct WithdrawalTransaction {
        uint256 nonce;
        address sender;
        address target;
        uint256 value;
        uint256 gasLimit;
        bytes data;
    }
}
