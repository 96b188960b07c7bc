//! The claim path: pulling pre-delegated value from an arbitrary foreign
//! account into an identity's bridge-controlled account.
//!
//! The pre-authorization happens entirely outside this engine: the
//! foreign account's owner delegates an amount to the recipient's external
//! authority, and a claim then consumes that delegation. Whether a claim
//! fails for lack of delegation or lack of funds is decided inside the
//! foreign ledger; both come back as the same opaque rejection and are
//! not told apart here.

use alloy_primitives::Address;
use solana_program::pubkey::Pubkey;
use svm_ledger::TokenLedger;
use tracing::debug;

use crate::error::Error;
use crate::token::Erc20ForSpl;

impl<L: TokenLedger> Erc20ForSpl<L> {
    /// Pulls `amount` from `source` into the caller's own
    /// bridge-controlled account.
    pub fn claim(&mut self, caller: Address, source: Pubkey, amount: u64) -> Result<(), Error> {
        self.claim_to(source, caller, amount)
    }

    /// Pulls `amount` from `source` into `recipient`'s bridge-controlled
    /// account. Any caller may submit this; the standing delegation to the
    /// recipient's external authority is what authorizes it.
    pub fn claim_to(
        &mut self,
        source: Pubkey,
        recipient: Address,
        amount: u64,
    ) -> Result<(), Error> {
        if recipient == Address::ZERO || source == Pubkey::default() {
            return Err(Error::EmptyAddress);
        }
        let dest = self.solana_account(&recipient);
        self.materialize(dest)?;
        let authority = self.ext_authority(&recipient);
        self.ledger.transfer(source, dest, authority, amount)?;
        debug!(%source, %recipient, amount, "claim");
        Ok(())
    }
}
