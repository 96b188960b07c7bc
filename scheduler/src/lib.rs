//! Asynchronous call path for foreign keypair holders.
//!
//! A Solana keypair holder has no key in the 20-byte address space, so it
//! cannot sign calls directly. Instead it submits a borsh-encoded
//! [`ScheduledCall`] naming a target contract and ABI calldata; the
//! executor later replays the call against the engine with the caller
//! identity derived from the submitting public key. Once that identity is
//! derived the engine treats the call like any other; only the timing
//! differs. Execution is asynchronous and best-effort, with no built-in
//! completion signal, retry, or cancellation.

pub mod executor;
pub mod state;

pub use executor::{Executor, ScheduleError, Scheduler};
pub use state::ScheduledCall;
