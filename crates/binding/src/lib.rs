//! Contract bindings for the OP Stack withdrawal path.
//!
//! Bindings are generated using alloy's `sol!` macro. Only the
//! L2ToL1MessagePasser surface and the `WithdrawalTransaction` struct are
//! needed to rebuild withdrawal hashes from raw logs.

pub mod opstack;
