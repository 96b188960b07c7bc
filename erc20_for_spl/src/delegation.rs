//! Allowances between ledger identities, and the single-slot foreign
//! delegation written through to the caller's bridge-controlled account.

use alloy_primitives::{Address, U256};
use solana_program::program_option::COption;
use solana_program::pubkey::Pubkey;
use svm_ledger::TokenLedger;
use tracing::debug;

use crate::error::Error;
use crate::token::Erc20ForSpl;

impl<L: TokenLedger> Erc20ForSpl<L> {
    /// Sets `spender`'s standing allowance over the caller's balance.
    /// Overwrites, never accumulates.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> Result<(), Error> {
        if caller == Address::ZERO || spender == Address::ZERO {
            return Err(Error::EmptyAddress);
        }
        self.allowances.insert((caller, spender), amount);
        debug!(owner = %caller, %spender, %amount, "approval");
        Ok(())
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Delegates `amount` of the caller's bridge-controlled account to an
    /// arbitrary foreign account.
    ///
    /// The foreign account format holds exactly one delegate, so a second
    /// call replaces the first. A zero amount or zero delegate revokes,
    /// clearing both fields.
    pub fn approve_solana(
        &mut self,
        caller: Address,
        delegate: Pubkey,
        amount: u64,
    ) -> Result<(), Error> {
        if caller == Address::ZERO {
            return Err(Error::EmptyAddress);
        }
        let account = self.solana_account(&caller);
        self.materialize(account)?;
        if amount == 0 || delegate == Pubkey::default() {
            self.ledger.set_delegate(account, account, None, 0)?;
        } else {
            self.ledger
                .set_delegate(account, account, Some(delegate), amount)?;
        }
        debug!(owner = %caller, %delegate, amount, "foreign delegation");
        Ok(())
    }

    /// The delegate slot of the identity's bridge-controlled account as it
    /// stands on the foreign ledger; zero values when the account is
    /// absent or undelegated.
    pub fn get_account_delegate_data(&self, identity: &Address) -> (Pubkey, u64) {
        match self.ledger.account(&self.solana_account(identity)) {
            Some(account) => match account.delegate {
                COption::Some(delegate) => (delegate, account.delegated_amount),
                COption::None => (Pubkey::default(), 0),
            },
            None => (Pubkey::default(), 0),
        }
    }
}
