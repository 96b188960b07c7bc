//! An ERC20-shaped token interface whose value lives in SPL token
//! accounts on a foreign ledger.
//!
//! Each 20-byte identity gets a deterministically derived,
//! bridge-controlled token account, and may additionally bring its own
//! associated token account into view by delegating it to a per-identity
//! external authority. Balances are read-through aggregates over those
//! two accounts; transfers drain the bridge-controlled account first.
//! External owners push value in through the claim path without ever
//! issuing a call themselves.

pub mod constants;
pub mod derive;
pub mod error;
pub mod solidity;

mod balance;
mod claim;
mod delegation;
mod spend;
mod token;

#[cfg(test)]
mod testing;

pub use error::Error;
pub use token::{Erc20ForSpl, TokenConfig};
