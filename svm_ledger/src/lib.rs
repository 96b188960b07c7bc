//! Boundary to the SVM token ledger.
//!
//! The bridge engine never talks to the token program directly; it goes
//! through [`TokenLedger`], a small set of account-level primitives. Every
//! rejection coming back across this boundary is an opaque
//! [`LedgerError`] carrying the token program's own message; callers
//! pass it through rather than interpreting it.

pub mod error;
pub mod memory;

use alloy_primitives::Address;
use solana_program::pubkey::Pubkey;
use spl_token::state::{Account, Mint};

pub use error::LedgerError;
pub use memory::MemoryLedger;

/// Account-level view of a single SPL mint and its token accounts.
///
/// One instance covers one mint; which mint that is gets fixed when the
/// backing store is constructed.
pub trait TokenLedger {
    /// Reads a token account. `None` means the account does not exist on
    /// the ledger, which is a valid zero-balance state rather than an
    /// error.
    fn account(&self, key: &Pubkey) -> Option<Account>;

    /// Reads the mint itself (supply, decimals).
    fn mint_account(&self) -> Mint;

    /// Materializes an empty token account at `key` owned by `owner`.
    fn create_account(&mut self, key: Pubkey, owner: Pubkey) -> Result<(), LedgerError>;

    /// Moves `amount` from `from` to `to`. `authority` must be the source
    /// account's owner, or its delegate with enough delegated amount; a
    /// delegate spend decrements the delegated amount and clears the
    /// delegate slot when it reaches zero.
    fn transfer(
        &mut self,
        from: Pubkey,
        to: Pubkey,
        authority: Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Sets the account's single delegate slot, or clears it when
    /// `delegate` is `None`. `authority` must be the account owner.
    fn set_delegate(
        &mut self,
        account: Pubkey,
        authority: Pubkey,
        delegate: Option<Pubkey>,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Destroys `amount` held by `account`, reducing the mint supply.
    /// Same authority rules as [`TokenLedger::transfer`].
    fn burn(&mut self, account: Pubkey, authority: Pubkey, amount: u64) -> Result<(), LedgerError>;

    /// Host-environment lookup: the Solana pubkey registered for a ledger
    /// identity, if that identity belongs to a native keypair holder.
    fn solana_address(&self, identity: &Address) -> Option<Pubkey>;

    fn account_exists(&self, key: &Pubkey) -> bool {
        self.account(key).is_some()
    }
}
