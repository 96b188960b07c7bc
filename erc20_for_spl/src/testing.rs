//! Shared builders for module tests, in the spirit of funding accounts by
//! writing raw token state into the harness ledger.

use alloy_primitives::{Address, U256};
use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use svm_ledger::{MemoryLedger, TokenLedger};

use crate::token::{Erc20ForSpl, TokenConfig};

pub struct TestEnv {
    pub token: Erc20ForSpl<MemoryLedger>,
}

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn u256(value: u64) -> U256 {
    U256::from(value)
}

pub fn setup() -> TestEnv {
    let mint = Pubkey::new_unique();
    let ledger = MemoryLedger::new(mint, 9);
    let token = Erc20ForSpl::new(
        ledger,
        TokenConfig {
            evm_program: Pubkey::new_unique(),
            contract: addr(0xEC),
            token_mint: mint,
            name: "Wrapped Token".to_string(),
            symbol: "wTKN".to_string(),
        },
    )
    .expect("mint is initialized");
    TestEnv { token }
}

impl TestEnv {
    /// Credits `amount` to the identity's bridge-controlled account,
    /// materializing it first.
    pub fn fund_contract_account(&mut self, identity: Address, amount: u64) {
        let account = self.token.solana_account(&identity);
        self.token.materialize(account).unwrap();
        self.token.ledger_mut().mint_to(account, amount).unwrap();
    }

    /// Registers a fresh Solana keypair holder, creates and funds its
    /// associated token account, and returns the derived identity plus the
    /// associated account address.
    pub fn register_native_with_ata(&mut self, amount: u64) -> (Address, Pubkey) {
        let wallet = Pubkey::new_unique();
        let mint = self.token.token_mint();
        let identity = self.token.ledger_mut().register_native(wallet);
        let ata = get_associated_token_address(&wallet, &mint);
        self.token.ledger_mut().create_account(ata, wallet).unwrap();
        if amount > 0 {
            self.token.ledger_mut().mint_to(ata, amount).unwrap();
        }
        (identity, ata)
    }

    /// Out-of-band join: the associated account's owner approves the
    /// identity's external authority over `amount`.
    pub fn delegate_ata_to_ext_authority(&mut self, ata: Pubkey, identity: Address, amount: u64) {
        let authority = self.token.ext_authority(&identity);
        self.delegate_external_to_authority(ata, authority, amount);
    }

    /// Out-of-band claim pre-authorization: `source`'s owner delegates
    /// `amount` to `recipient`'s external authority.
    pub fn delegate_external_to(&mut self, source: Pubkey, recipient: Address, amount: u64) {
        let authority = self.token.ext_authority(&recipient);
        self.delegate_external_to_authority(source, authority, amount);
    }

    fn delegate_external_to_authority(&mut self, source: Pubkey, authority: Pubkey, amount: u64) {
        let owner = self.token.ledger().account(&source).unwrap().owner;
        self.token
            .ledger_mut()
            .set_delegate(source, owner, Some(authority), amount)
            .unwrap();
    }

    /// A funded stand-alone token account owned by an external keypair,
    /// outside the bridge's accounting domain.
    pub fn external_account(&mut self, amount: u64) -> Pubkey {
        let owner = Pubkey::new_unique();
        let account = Pubkey::new_unique();
        self.token.ledger_mut().create_account(account, owner).unwrap();
        if amount > 0 {
            self.token.ledger_mut().mint_to(account, amount).unwrap();
        }
        account
    }
}
