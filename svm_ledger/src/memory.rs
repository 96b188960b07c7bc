//! Hermetic, in-process implementation of [`TokenLedger`].
//!
//! Accounts are held as raw `spl_token` state and every primitive applies
//! the token program's authority rules, so delegate consumption and
//! failure messages behave exactly like the real ledger.

use std::collections::HashMap;

use alloy_primitives::Address;
use solana_program::program_option::COption;
use solana_program::pubkey::Pubkey;
use spl_token::error::TokenError;
use spl_token::state::{Account, AccountState, Mint};

use crate::{LedgerError, TokenLedger};

pub struct MemoryLedger {
    mint: Pubkey,
    mint_state: Mint,
    accounts: HashMap<Pubkey, Account>,
    native: HashMap<Address, Pubkey>,
}

impl MemoryLedger {
    pub fn new(mint: Pubkey, decimals: u8) -> Self {
        MemoryLedger {
            mint,
            mint_state: Mint {
                mint_authority: COption::Some(mint),
                supply: 0,
                decimals,
                is_initialized: true,
                freeze_authority: COption::None,
            },
            accounts: HashMap::new(),
            native: HashMap::new(),
        }
    }

    pub fn mint_pubkey(&self) -> Pubkey {
        self.mint
    }

    /// Registers a Solana keypair holder with the host environment and
    /// returns the ledger identity derived from its public key.
    pub fn register_native(&mut self, pubkey: Pubkey) -> Address {
        let identity = common::payer_address(&pubkey);
        self.native.insert(identity, pubkey);
        identity
    }

    /// Test-harness funding: credits `account` and grows the mint supply.
    pub fn mint_to(&mut self, account: Pubkey, amount: u64) -> Result<(), LedgerError> {
        let state = self
            .accounts
            .get_mut(&account)
            .ok_or(TokenError::UninitializedState)?;
        state.amount = state
            .amount
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.mint_state.supply = self
            .mint_state
            .supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Applies the token program's source-authority rules and, for a
    /// delegate spend, consumes delegated amount, clearing the slot when
    /// it reaches zero. `keep_delegation` skips the consumption (the
    /// self-transfer rule).
    fn debit_authority(
        source: &mut Account,
        authority: &Pubkey,
        amount: u64,
        keep_delegation: bool,
    ) -> Result<(), LedgerError> {
        match source.delegate {
            COption::Some(ref delegate) if delegate == authority => {
                if source.delegated_amount < amount {
                    return Err(TokenError::InsufficientFunds.into());
                }
                if !keep_delegation {
                    source.delegated_amount -= amount;
                    if source.delegated_amount == 0 {
                        source.delegate = COption::None;
                    }
                }
            }
            _ => {
                if source.owner != *authority {
                    return Err(TokenError::OwnerMismatch.into());
                }
            }
        }
        Ok(())
    }
}

impl TokenLedger for MemoryLedger {
    fn account(&self, key: &Pubkey) -> Option<Account> {
        self.accounts.get(key).copied()
    }

    fn mint_account(&self) -> Mint {
        self.mint_state
    }

    fn create_account(&mut self, key: Pubkey, owner: Pubkey) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&key) {
            return Err(TokenError::AlreadyInUse.into());
        }
        self.accounts.insert(
            key,
            Account {
                mint: self.mint,
                owner,
                amount: 0,
                delegate: COption::None,
                state: AccountState::Initialized,
                is_native: COption::None,
                delegated_amount: 0,
                close_authority: COption::None,
            },
        );
        Ok(())
    }

    fn transfer(
        &mut self,
        from: Pubkey,
        to: Pubkey,
        authority: Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(&to) {
            return Err(TokenError::UninitializedState.into());
        }
        let self_transfer = from == to;

        let source = self
            .accounts
            .get_mut(&from)
            .ok_or(TokenError::UninitializedState)?;
        if source.amount < amount {
            return Err(TokenError::InsufficientFunds.into());
        }
        Self::debit_authority(source, &authority, amount, self_transfer)?;
        if self_transfer {
            return Ok(());
        }
        source.amount -= amount;

        let dest = self
            .accounts
            .get_mut(&to)
            .ok_or(TokenError::UninitializedState)?;
        dest.amount = dest.amount.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    fn set_delegate(
        &mut self,
        account: Pubkey,
        authority: Pubkey,
        delegate: Option<Pubkey>,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let state = self
            .accounts
            .get_mut(&account)
            .ok_or(TokenError::UninitializedState)?;
        if state.owner != authority {
            return Err(TokenError::OwnerMismatch.into());
        }
        match delegate {
            Some(delegate) => {
                state.delegate = COption::Some(delegate);
                state.delegated_amount = amount;
            }
            None => {
                state.delegate = COption::None;
                state.delegated_amount = 0;
            }
        }
        Ok(())
    }

    fn burn(&mut self, account: Pubkey, authority: Pubkey, amount: u64) -> Result<(), LedgerError> {
        let state = self
            .accounts
            .get_mut(&account)
            .ok_or(TokenError::UninitializedState)?;
        if state.amount < amount {
            return Err(TokenError::InsufficientFunds.into());
        }
        Self::debit_authority(state, &authority, amount, false)?;
        state.amount -= amount;
        self.mint_state.supply = self
            .mint_state
            .supply
            .checked_sub(amount)
            .ok_or(TokenError::Overflow)?;
        Ok(())
    }

    fn solana_address(&self, identity: &Address) -> Option<Pubkey> {
        self.native.get(identity).copied()
    }
}
