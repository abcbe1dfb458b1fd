//! Error types for the Impact Ledger

use super::value_objects::ChallengeId;
use thiserror::Error;

/// All errors surfaced by ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// `complete_challenge` referenced an id outside the active set
    #[error("Challenge not found: {id}")]
    ChallengeNotFound { id: ChallengeId },

    /// Negative or non-finite action value
    #[error("Invalid action value: {value} (must be finite and >= 0)")]
    InvalidInput { value: f64 },

    /// Counter write did not complete.
    ///
    /// The in-memory state change has already been applied; `pending_keys` stay
    /// queued until a later flush succeeds.
    #[error("Persistence failed for {} key(s): {source}", .pending_keys.len())]
    Persistence {
        #[source]
        source: StoreError,
        pending_keys: Vec<String>,
    },

    /// Counter read failed while hydrating
    #[error("Hydration failed: {0}")]
    Hydration(#[source] StoreError),

    #[error("Ranking unavailable: {0}")]
    Ranking(#[from] RankingError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The per-user actor has shut down
    #[error("Ledger actor unavailable")]
    ActorUnavailable,
}

/// CounterStore failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt value for {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Ranking provider failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RankingError {
    #[error("No community standings available")]
    NoStandings,

    #[error("Ranking source failed: {0}")]
    SourceFailed(String),
}
