//! Derivation of the foreign-ledger accounts belonging to a ledger
//! identity. Pure functions of their inputs; the authority checks on the
//! foreign side trust exactly the addresses computed here.

use alloy_primitives::Address;
use solana_program::pubkey::Pubkey;

use crate::constants::{ACCOUNT_SEED_VERSION, AUTH_SEED, CONTRACT_DATA_SEED};

/// The bridge-controlled token account of `identity`.
pub fn contract_data_account(
    evm_program: &Pubkey,
    contract: &Address,
    identity: &Address,
) -> Pubkey {
    derive(CONTRACT_DATA_SEED, evm_program, contract, identity)
}

/// The delegate-target authority keyed by `identity`. An external account
/// owner approves this address to let value be claimed for `identity`, and
/// an identity's own associated account joins the bridge's accounting by
/// delegating to it.
pub fn ext_authority_account(
    evm_program: &Pubkey,
    contract: &Address,
    identity: &Address,
) -> Pubkey {
    derive(AUTH_SEED, evm_program, contract, identity)
}

fn derive(tag: &[u8], evm_program: &Pubkey, contract: &Address, identity: &Address) -> Pubkey {
    Pubkey::find_program_address(
        &[
            ACCOUNT_SEED_VERSION,
            tag,
            contract.as_slice(),
            &common::address_salt(identity),
        ],
        evm_program,
    )
    .0
}
