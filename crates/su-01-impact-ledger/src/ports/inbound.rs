//! Inbound Ports (Driving Ports / API)
//!
//! The two mutation entry points plus period and persistence control.
//! Every method takes `&mut self`: one ledger has exactly one writer.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{Achievement, LedgerState};
use crate::domain::errors::LedgerError;
use crate::domain::value_objects::{ActionKind, ChallengeId, Points};

/// Result of a successful `log_action`
#[derive(Clone, Debug, Serialize)]
pub struct ActionOutcome {
    /// Achievements that transitioned Locked -> Unlocked during this action
    pub newly_unlocked: Vec<Achievement>,
    pub snapshot: LedgerState,
}

/// Result of a successful `complete_challenge`
#[derive(Clone, Debug, Serialize)]
pub struct ChallengeOutcome {
    /// `false` when the challenge was already completed (no-op)
    pub completed: bool,
    pub points_awarded: Points,
    pub streak_count: u32,
    pub snapshot: LedgerState,
}

/// Primary Impact Ledger API
#[async_trait]
pub trait ImpactLedgerApi: Send {
    /// Add `value` to the counter matching `kind`, then re-rank, evaluate
    /// unlocks and write the counters through.
    ///
    /// Negative or non-finite values are rejected with `InvalidInput` and
    /// leave the state untouched.
    async fn log_action(&mut self, kind: ActionKind, value: f64)
        -> Result<ActionOutcome, LedgerError>;

    /// Complete a challenge from the active set.
    ///
    /// Unknown ids fail with `ChallengeNotFound`; completing twice is a no-op.
    async fn complete_challenge(
        &mut self,
        id: &ChallengeId,
    ) -> Result<ChallengeOutcome, LedgerError>;

    /// Start a new period if the clock has moved past the current one.
    ///
    /// Returns whether a rollover happened.
    async fn roll_period(&mut self) -> Result<bool, LedgerError>;

    /// Retry counter writes left pending by an earlier persistence failure.
    async fn flush(&mut self) -> Result<(), LedgerError>;

    /// Read-only copy of the current state
    fn snapshot(&self) -> LedgerState;

    /// Number of counter writes not yet acknowledged by the store
    fn pending_writes(&self) -> usize;
}
