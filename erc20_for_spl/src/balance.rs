//! Balance aggregation. A balance is a read-through view over foreign
//! state, computed fresh on every call and never cached.

use alloy_primitives::{Address, U256};
use svm_ledger::TokenLedger;

use crate::token::Erc20ForSpl;

impl<L: TokenLedger> Erc20ForSpl<L> {
    /// Sum of the identity's bridge-controlled account and the delegated
    /// portion of its self-owned associated account.
    ///
    /// An absent bridge-controlled account contributes zero. The
    /// associated account contributes `min(delegated, held)`, since an
    /// owner may hold more than they delegated, and contributes nothing
    /// at all while it is not delegated to this identity's external
    /// authority.
    pub fn balance_of(&self, identity: &Address) -> U256 {
        let held = self
            .ledger
            .account(&self.solana_account(identity))
            .map(|account| account.amount)
            .unwrap_or(0) as u128;

        let delegated = self
            .delegated_associated_account(identity)
            .map(|(_, account)| account.amount.min(account.delegated_amount))
            .unwrap_or(0) as u128;

        U256::from(held + delegated)
    }

    /// The mint's own supply counter.
    pub fn total_supply(&self) -> U256 {
        U256::from(self.ledger.mint_account().supply)
    }
}
