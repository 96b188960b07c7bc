use svm_ledger::LedgerError;
use thiserror::Error;

/// Failures surfaced by the token interface.
///
/// Everything except [`Error::Ledger`] is raised before any foreign-ledger
/// interaction, so no state has changed when one of those is returned.
/// [`Error::Ledger`] carries a rejection produced inside the foreign
/// ledger, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("empty address")]
    EmptyAddress,

    #[error("amount exceeds 64 bits")]
    AmountExceedsUint64,

    #[error("amount exceeds balance")]
    AmountExceedsBalance,

    #[error("invalid allowance")]
    InvalidAllowance,

    #[error("invalid token mint")]
    InvalidTokenMint,

    #[error("{0}")]
    Ledger(#[from] LedgerError),
}
