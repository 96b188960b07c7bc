use borsh::{BorshDeserialize, BorshSerialize};

/// One call submitted on the foreign ledger for later replay.
///
/// The sender never holds a key in the 20-byte address space; its caller
/// identity is derived from the foreign public key at execution time.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ScheduledCall {
    /// Public key of the foreign keypair that signed the submission.
    pub sender: [u8; 32],
    /// Target contract in the 20-byte address space.
    pub target: [u8; 20],
    /// ABI-encoded calldata for the target.
    pub data: Vec<u8>,
    pub nonce: u64,
}
