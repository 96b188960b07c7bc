use thiserror::Error;

/// Opaque rejection from the token ledger.
///
/// The message is whatever the ledger produced, propagated verbatim; no
/// caller should branch on its contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LedgerError(pub String);

impl From<spl_token::error::TokenError> for LedgerError {
    fn from(err: spl_token::error::TokenError) -> Self {
        LedgerError(err.to_string())
    }
}
