//! The spend path behind transfers and burns.
//!
//! Value is consumed from two places in a fixed order: the
//! bridge-controlled account is drained first, and only a remaining
//! shortfall is drawn from the delegated portion of the caller's
//! self-owned associated account, through the foreign ledger's delegate
//! path.

use alloy_primitives::{Address, U256};
use solana_program::pubkey::Pubkey;
use svm_ledger::TokenLedger;
use tracing::debug;

use crate::error::Error;
use crate::token::Erc20ForSpl;

/// Snapshot of what an identity can spend, read fresh per call.
struct SpendSources {
    contract_account: Pubkey,
    held: u64,
    /// Associated account and the portion of it actually reachable,
    /// `min(delegated, held)`; `None` while undelegated.
    delegated: Option<(Pubkey, u64)>,
}

impl<L: TokenLedger> Erc20ForSpl<L> {
    pub fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<(), Error> {
        let amount = Self::cast_u64(amount)?;
        if caller == Address::ZERO || to == Address::ZERO {
            return Err(Error::EmptyAddress);
        }
        let dest = self.solana_account(&to);
        let sources = self.sources(&caller);
        Self::ensure_available(&sources, amount)?;
        self.materialize(dest)?;
        self.execute_transfer(&caller, sources, dest, amount)?;
        debug!(from = %caller, %to, amount, "transfer");
        Ok(())
    }

    /// Transfer to a raw foreign account. The destination is taken as-is
    /// and never materialized; a missing account is the foreign ledger's
    /// rejection to make.
    pub fn transfer_solana(
        &mut self,
        caller: Address,
        to: Pubkey,
        amount: u64,
    ) -> Result<(), Error> {
        if caller == Address::ZERO || to == Pubkey::default() {
            return Err(Error::EmptyAddress);
        }
        let sources = self.sources(&caller);
        Self::ensure_available(&sources, amount)?;
        self.execute_transfer(&caller, sources, to, amount)?;
        debug!(from = %caller, %to, amount, "transfer to foreign account");
        Ok(())
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Error> {
        let amount64 = Self::cast_u64(amount)?;
        if caller == Address::ZERO || from == Address::ZERO || to == Address::ZERO {
            return Err(Error::EmptyAddress);
        }
        let current = self.allowance(&from, &caller);
        if current < amount {
            return Err(Error::InvalidAllowance);
        }
        let dest = self.solana_account(&to);
        let sources = self.sources(&from);
        Self::ensure_available(&sources, amount64)?;
        self.allowances.insert((from, caller), current - amount);
        self.materialize(dest)?;
        self.execute_transfer(&from, sources, dest, amount64)?;
        debug!(spender = %caller, %from, %to, amount = amount64, "transfer from");
        Ok(())
    }

    pub fn transfer_solana_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Pubkey,
        amount: u64,
    ) -> Result<(), Error> {
        if caller == Address::ZERO || from == Address::ZERO || to == Pubkey::default() {
            return Err(Error::EmptyAddress);
        }
        let current = self.allowance(&from, &caller);
        if current < U256::from(amount) {
            return Err(Error::InvalidAllowance);
        }
        let sources = self.sources(&from);
        Self::ensure_available(&sources, amount)?;
        self.allowances
            .insert((from, caller), current - U256::from(amount));
        self.execute_transfer(&from, sources, to, amount)?;
        debug!(spender = %caller, %from, %to, amount, "transfer from to foreign account");
        Ok(())
    }

    /// Destroys `amount` of the caller's balance, shrinking the supply.
    pub fn burn(&mut self, caller: Address, amount: U256) -> Result<(), Error> {
        let amount = Self::cast_u64(amount)?;
        if caller == Address::ZERO {
            return Err(Error::EmptyAddress);
        }
        let sources = self.sources(&caller);
        Self::ensure_available(&sources, amount)?;
        self.execute_burn(&caller, sources, amount)?;
        debug!(from = %caller, amount, "burn");
        Ok(())
    }

    pub fn burn_from(&mut self, caller: Address, from: Address, amount: U256) -> Result<(), Error> {
        let amount64 = Self::cast_u64(amount)?;
        if caller == Address::ZERO || from == Address::ZERO {
            return Err(Error::EmptyAddress);
        }
        let current = self.allowance(&from, &caller);
        if current < amount {
            return Err(Error::InvalidAllowance);
        }
        let sources = self.sources(&from);
        Self::ensure_available(&sources, amount64)?;
        self.allowances.insert((from, caller), current - amount);
        self.execute_burn(&from, sources, amount64)?;
        debug!(spender = %caller, %from, amount = amount64, "burn from");
        Ok(())
    }

    fn sources(&self, identity: &Address) -> SpendSources {
        let contract_account = self.solana_account(identity);
        let held = self
            .ledger
            .account(&contract_account)
            .map(|account| account.amount)
            .unwrap_or(0);
        let delegated = self
            .delegated_associated_account(identity)
            .map(|(key, account)| (key, account.amount.min(account.delegated_amount)));
        SpendSources {
            contract_account,
            held,
            delegated,
        }
    }

    fn ensure_available(sources: &SpendSources, amount: u64) -> Result<(), Error> {
        let reachable = sources.delegated.map(|(_, amount)| amount).unwrap_or(0);
        if (amount as u128) > sources.held as u128 + reachable as u128 {
            return Err(Error::AmountExceedsBalance);
        }
        Ok(())
    }

    fn execute_transfer(
        &mut self,
        from: &Address,
        sources: SpendSources,
        dest: Pubkey,
        amount: u64,
    ) -> Result<(), Error> {
        let first = amount.min(sources.held);
        if first > 0 {
            self.ledger.transfer(
                sources.contract_account,
                dest,
                sources.contract_account,
                first,
            )?;
        }
        let rest = amount - first;
        if rest > 0 {
            if let Some((associated, _)) = sources.delegated {
                let authority = self.ext_authority(from);
                self.ledger.transfer(associated, dest, authority, rest)?;
            }
        }
        Ok(())
    }

    fn execute_burn(
        &mut self,
        from: &Address,
        sources: SpendSources,
        amount: u64,
    ) -> Result<(), Error> {
        let first = amount.min(sources.held);
        if first > 0 {
            self.ledger
                .burn(sources.contract_account, sources.contract_account, first)?;
        }
        let rest = amount - first;
        if rest > 0 {
            if let Some((associated, _)) = sources.delegated {
                let authority = self.ext_authority(from);
                self.ledger.burn(associated, authority, rest)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use svm_ledger::TokenLedger;

    #[test]
    fn transfer_conserves_balances_and_supply() {
        let mut env = setup();
        let (a, b) = (addr(0x0A), addr(0x0B));
        env.fund_contract_account(a, 100);
        env.fund_contract_account(b, 7);
        let supply = env.token.total_supply();

        env.token.transfer(a, b, u256(40)).unwrap();
        assert_eq!(env.token.balance_of(&a), u256(60));
        assert_eq!(env.token.balance_of(&b), u256(47));
        assert_eq!(env.token.total_supply(), supply);
    }

    #[test]
    fn transfer_materializes_recipient_account() {
        let mut env = setup();
        let (a, b) = (addr(0x0A), addr(0x0B));
        env.fund_contract_account(a, 10);

        let dest = env.token.solana_account(&b);
        assert!(!env.token.ledger().account_exists(&dest));
        env.token.transfer(a, b, u256(10)).unwrap();
        assert!(env.token.ledger().account_exists(&dest));
        assert_eq!(env.token.balance_of(&b), u256(10));
    }

    #[test]
    fn transfer_rejects_zero_recipient() {
        let mut env = setup();
        env.fund_contract_account(addr(0x0A), 10);
        let err = env
            .token
            .transfer(addr(0x0A), Address::ZERO, u256(1))
            .unwrap_err();
        assert_eq!(err, Error::EmptyAddress);
    }

    #[test]
    fn transfer_rejects_amount_beyond_balance() {
        let mut env = setup();
        env.fund_contract_account(addr(0x0A), 10);
        let err = env
            .token
            .transfer(addr(0x0A), addr(0x0B), u256(11))
            .unwrap_err();
        assert_eq!(err, Error::AmountExceedsBalance);
    }

    #[test]
    fn wide_amounts_are_rejected_without_mutation() {
        let mut env = setup();
        let (a, b) = (addr(0x0A), addr(0x0B));
        env.fund_contract_account(a, 10);
        env.token.approve(a, b, u256(5)).unwrap();

        let wide = U256::from(u64::MAX) + U256::from(1);
        assert_eq!(
            env.token.transfer(a, b, wide).unwrap_err(),
            Error::AmountExceedsUint64
        );
        assert_eq!(
            env.token.burn(a, wide).unwrap_err(),
            Error::AmountExceedsUint64
        );
        assert_eq!(
            env.token.transfer_from(b, a, b, wide).unwrap_err(),
            Error::AmountExceedsUint64
        );

        assert_eq!(env.token.balance_of(&a), u256(10));
        assert_eq!(env.token.allowance(&a, &b), u256(5));
        assert_eq!(env.token.total_supply(), u256(10));
    }

    #[test]
    fn spend_drains_contract_account_before_delegated_portion() {
        let mut env = setup();
        let (identity, ata) = env.register_native_with_ata(3);
        env.fund_contract_account(identity, 5);
        env.delegate_ata_to_ext_authority(ata, identity, 3);
        assert_eq!(env.token.balance_of(&identity), u256(8));

        env.token.transfer(identity, addr(0x0B), u256(6)).unwrap();

        let contract_account = env.token.solana_account(&identity);
        assert_eq!(
            env.token.ledger().account(&contract_account).unwrap().amount,
            0
        );
        let ata_state = env.token.ledger().account(&ata).unwrap();
        assert_eq!(ata_state.amount, 2);
        assert_eq!(ata_state.delegated_amount, 2);
        assert_eq!(env.token.balance_of(&identity), u256(2));
        assert_eq!(env.token.balance_of(&addr(0x0B)), u256(6));
    }

    #[test]
    fn transfer_within_contract_account_leaves_delegation_untouched() {
        let mut env = setup();
        let (identity, ata) = env.register_native_with_ata(3);
        env.fund_contract_account(identity, 5);
        env.delegate_ata_to_ext_authority(ata, identity, 3);

        env.token.transfer(identity, addr(0x0B), u256(4)).unwrap();
        let ata_state = env.token.ledger().account(&ata).unwrap();
        assert_eq!(ata_state.amount, 3);
        assert_eq!(ata_state.delegated_amount, 3);
    }

    #[test]
    fn transfer_from_requires_allowance() {
        let mut env = setup();
        let (a, b) = (addr(0x0A), addr(0x0B));
        env.fund_contract_account(a, 10);

        assert_eq!(
            env.token.transfer_from(b, a, b, u256(1)).unwrap_err(),
            Error::InvalidAllowance
        );

        env.token.approve(a, b, u256(20)).unwrap();
        assert_eq!(
            env.token.transfer_from(b, a, b, u256(15)).unwrap_err(),
            Error::AmountExceedsBalance
        );

        env.token.transfer_from(b, a, b, u256(4)).unwrap();
        assert_eq!(env.token.allowance(&a, &b), u256(16));
        assert_eq!(env.token.balance_of(&a), u256(6));
        assert_eq!(env.token.balance_of(&b), u256(4));
    }

    #[test]
    fn burn_shrinks_balance_and_supply() {
        let mut env = setup();
        let a = addr(0x0A);
        env.fund_contract_account(a, 10);

        env.token.burn(a, u256(3)).unwrap();
        assert_eq!(env.token.balance_of(&a), u256(7));
        assert_eq!(env.token.total_supply(), u256(7));
    }

    #[test]
    fn burn_from_spends_allowance() {
        let mut env = setup();
        let (a, b) = (addr(0x0A), addr(0x0B));
        env.fund_contract_account(a, 10);

        assert_eq!(
            env.token.burn_from(b, a, u256(1)).unwrap_err(),
            Error::InvalidAllowance
        );
        env.token.approve(a, b, u256(5)).unwrap();
        env.token.burn_from(b, a, u256(5)).unwrap();
        assert_eq!(env.token.allowance(&a, &b), U256::ZERO);
        assert_eq!(env.token.balance_of(&a), u256(5));
        assert_eq!(env.token.total_supply(), u256(5));
    }

    #[test]
    fn transfer_solana_reaches_raw_foreign_accounts() {
        let mut env = setup();
        let a = addr(0x0A);
        env.fund_contract_account(a, 10);
        let external = env.external_account(0);

        env.token.transfer_solana(a, external, 4).unwrap();
        assert_eq!(env.token.ledger().account(&external).unwrap().amount, 4);
        assert_eq!(env.token.balance_of(&a), u256(6));
    }

    #[test]
    fn transfer_solana_to_missing_account_is_a_foreign_rejection() {
        let mut env = setup();
        let a = addr(0x0A);
        env.fund_contract_account(a, 10);

        let err = env
            .token
            .transfer_solana(a, Pubkey::new_unique(), 1)
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(_)));
    }

    #[test]
    fn transfer_solana_from_spends_allowance() {
        let mut env = setup();
        let (a, b) = (addr(0x0A), addr(0x0B));
        env.fund_contract_account(a, 10);
        let external = env.external_account(0);

        env.token.approve(a, b, u256(6)).unwrap();
        env.token.transfer_solana_from(b, a, external, 6).unwrap();
        assert_eq!(env.token.ledger().account(&external).unwrap().amount, 6);
        assert_eq!(env.token.allowance(&a, &b), U256::ZERO);
    }
}
