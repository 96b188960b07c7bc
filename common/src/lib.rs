//! Shared conversions between the EVM-facing address space and Solana pubkeys.

pub mod address;

pub use address::{address_salt, bytes32_to_pubkey, payer_address, pubkey_to_bytes32};
