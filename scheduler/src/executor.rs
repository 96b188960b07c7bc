//! Submission queue and replay loop for scheduled calls.
//!
//! Submission is fire-and-forget: a [`Scheduler`] handle enqueues the
//! encoded instruction and returns immediately, and the [`Executor`]
//! replays it against the engine some time later. A call that fails to
//! decode or that the engine rejects is logged and dropped; clients that
//! care about the outcome observe ledger state and retry themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::Address;
use alloy_sol_types::SolInterface;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use svm_ledger::TokenLedger;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use erc20_for_spl::solidity::IErc20ForSpl::IErc20ForSplCalls;
use erc20_for_spl::Erc20ForSpl;

use crate::state::ScheduledCall;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The executor has shut down; nothing will be replayed anymore.
    #[error("scheduler is closed")]
    Closed,
}

/// Cheap, cloneable submission handle.
#[derive(Clone)]
pub struct Scheduler {
    queue: mpsc::UnboundedSender<Vec<u8>>,
    nonce: Arc<AtomicU64>,
}

impl Scheduler {
    /// Enqueues a call on behalf of a foreign keypair holder and returns
    /// its nonce. There is no completion signal and no cancellation; the
    /// instruction either lands or is never observed.
    pub fn submit(
        &self,
        sender: &Pubkey,
        target: Address,
        data: Vec<u8>,
    ) -> Result<u64, ScheduleError> {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let call = ScheduledCall {
            sender: sender.to_bytes(),
            target: target.into_array(),
            data,
            nonce,
        };
        let bytes = call.try_to_vec().map_err(|_| ScheduleError::Closed)?;
        self.queue.send(bytes).map_err(|_| ScheduleError::Closed)?;
        info!(nonce, %sender, "scheduled call");
        Ok(nonce)
    }
}

/// Drains the queue and replays each call on the engine.
pub struct Executor<L: TokenLedger> {
    token: Erc20ForSpl<L>,
    queue: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl<L: TokenLedger> Executor<L> {
    pub fn new(token: Erc20ForSpl<L>) -> (Scheduler, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Scheduler {
                queue: tx,
                nonce: Arc::new(AtomicU64::new(0)),
            },
            Executor { token, queue: rx },
        )
    }

    /// Runs until every [`Scheduler`] handle is dropped, then hands the
    /// engine back.
    pub async fn run(mut self) -> Erc20ForSpl<L> {
        while let Some(bytes) = self.queue.recv().await {
            self.relay(&bytes);
        }
        self.token
    }

    fn relay(&mut self, bytes: &[u8]) {
        let call = match ScheduledCall::try_from_slice(bytes) {
            Ok(call) => call,
            Err(err) => {
                warn!(%err, "dropping undecodable scheduled instruction");
                return;
            }
        };
        if Address::from(call.target) != self.token.contract() {
            warn!(nonce = call.nonce, target = %Address::from(call.target), "dropping call for unknown target");
            return;
        }
        let sender = Pubkey::new_from_array(call.sender);
        let caller = common::payer_address(&sender);
        let decoded = match IErc20ForSplCalls::abi_decode(&call.data, true) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(nonce = call.nonce, %caller, %err, "dropping undecodable calldata");
                return;
            }
        };
        match self.dispatch(caller, decoded) {
            Ok(()) => info!(nonce = call.nonce, %caller, "relayed scheduled call"),
            Err(err) => warn!(nonce = call.nonce, %caller, %err, "scheduled call rejected"),
        }
    }

    fn dispatch(
        &mut self,
        caller: Address,
        call: IErc20ForSplCalls,
    ) -> Result<(), erc20_for_spl::Error> {
        match call {
            IErc20ForSplCalls::transfer(c) => self.token.transfer(caller, c.to, c.amount),
            IErc20ForSplCalls::transferFrom(c) => {
                self.token.transfer_from(caller, c.from, c.to, c.amount)
            }
            IErc20ForSplCalls::approve(c) => self.token.approve(caller, c.spender, c.amount),
            IErc20ForSplCalls::burn(c) => self.token.burn(caller, c.amount),
            IErc20ForSplCalls::burnFrom(c) => self.token.burn_from(caller, c.from, c.amount),
            IErc20ForSplCalls::transferSolana(c) => {
                self.token
                    .transfer_solana(caller, common::bytes32_to_pubkey(&c.to), c.amount)
            }
            IErc20ForSplCalls::transferSolanaFrom(c) => self.token.transfer_solana_from(
                caller,
                c.from,
                common::bytes32_to_pubkey(&c.to),
                c.amount,
            ),
            IErc20ForSplCalls::approveSolana(c) => {
                self.token
                    .approve_solana(caller, common::bytes32_to_pubkey(&c.delegate), c.amount)
            }
            IErc20ForSplCalls::claim(c) => {
                self.token
                    .claim(caller, common::bytes32_to_pubkey(&c.from), c.amount)
            }
            IErc20ForSplCalls::claimTo(c) => {
                self.token
                    .claim_to(common::bytes32_to_pubkey(&c.from), c.to, c.amount)
            }
        }
    }
}
