use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::Account;
use svm_ledger::TokenLedger;

use crate::derive;
use crate::error::Error;

/// Deployment parameters of one token instance. The factory guarantees a
/// single instance per mint; nothing here is re-derived at runtime.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// The foreign-ledger program under which per-identity accounts are
    /// derived.
    pub evm_program: Pubkey,
    /// This instance's own 20-byte address, mixed into every derivation.
    pub contract: Address,
    /// The SPL mint this instance fronts.
    pub token_mint: Pubkey,
    pub name: String,
    pub symbol: String,
}

/// An ERC20-shaped view over value held in SPL token accounts.
///
/// Balances are never stored here: every read goes through to the foreign
/// ledger, and the only engine-local state is the allowance map plus the
/// immutable deployment config. All mutating entry points take the caller
/// identity explicitly.
pub struct Erc20ForSpl<L: TokenLedger> {
    pub(crate) ledger: L,
    pub(crate) config: TokenConfig,
    pub(crate) allowances: HashMap<(Address, Address), U256>,
}

impl<L: TokenLedger> Erc20ForSpl<L> {
    pub fn new(ledger: L, config: TokenConfig) -> Result<Self, Error> {
        if !ledger.mint_account().is_initialized {
            return Err(Error::InvalidTokenMint);
        }
        Ok(Erc20ForSpl {
            ledger,
            config,
            allowances: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.ledger.mint_account().decimals
    }

    pub fn token_mint(&self) -> Pubkey {
        self.config.token_mint
    }

    pub fn contract(&self) -> Address {
        self.config.contract
    }

    /// The bridge-controlled token account of `identity`; byte-identical
    /// across calls.
    pub fn solana_account(&self, identity: &Address) -> Pubkey {
        derive::contract_data_account(&self.config.evm_program, &self.config.contract, identity)
    }

    /// The delegate target an external account owner approves for
    /// `identity`.
    pub fn ext_authority(&self, identity: &Address) -> Pubkey {
        derive::ext_authority_account(&self.config.evm_program, &self.config.contract, identity)
    }

    /// Read access to the foreign ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The foreign ledger is shared, mutable state: external owners move
    /// funds and grant delegations on it outside any call into this
    /// engine. Tests and embedding environments reach it through here.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The identity's self-owned associated token account, if the host
    /// environment knows a native keypair for it.
    pub(crate) fn associated_account(&self, identity: &Address) -> Option<Pubkey> {
        let wallet = self.ledger.solana_address(identity)?;
        Some(get_associated_token_address(
            &wallet,
            &self.config.token_mint,
        ))
    }

    /// The associated account and its state, only while it is delegated to
    /// this identity's external authority. An existing but undelegated
    /// account is invisible.
    pub(crate) fn delegated_associated_account(
        &self,
        identity: &Address,
    ) -> Option<(Pubkey, Account)> {
        let key = self.associated_account(identity)?;
        let account = self.ledger.account(&key)?;
        if account.delegate
            == solana_program::program_option::COption::Some(self.ext_authority(identity))
        {
            Some((key, account))
        } else {
            None
        }
    }

    /// Lazily materializes a bridge-controlled account. The account is its
    /// own SPL owner.
    pub(crate) fn materialize(&mut self, account: Pubkey) -> Result<(), Error> {
        if !self.ledger.account_exists(&account) {
            self.ledger.create_account(account, account)?;
        }
        Ok(())
    }

    /// 64-bit ceiling applied to every wide amount before anything else.
    pub(crate) fn cast_u64(amount: U256) -> Result<u64, Error> {
        u64::try_from(amount).map_err(|_| Error::AmountExceedsUint64)
    }
}
