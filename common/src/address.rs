use alloy_primitives::{keccak256, Address, B256};
use solana_program::pubkey::Pubkey;

/// Pads a 20-byte address to the 32-byte seed form used by account
/// derivation: 12 zero bytes followed by the address.
pub fn address_salt(address: &Address) -> [u8; 32] {
    let mut salt = [0u8; 32];
    salt[12..].copy_from_slice(address.as_slice());
    salt
}

/// Ledger identity of a Solana keypair holder: the last 20 bytes of the
/// keccak-256 hash of its public key.
pub fn payer_address(pubkey: &Pubkey) -> Address {
    let digest = keccak256(pubkey.to_bytes());
    Address::from_slice(&digest[12..])
}

pub fn pubkey_to_bytes32(pubkey: &Pubkey) -> B256 {
    B256::from(pubkey.to_bytes())
}

pub fn bytes32_to_pubkey(value: &B256) -> Pubkey {
    Pubkey::new_from_array(value.0)
}
