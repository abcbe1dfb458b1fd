//! Configuration for the Impact Ledger

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::errors::LedgerError;
use crate::domain::value_objects::StreakPolicy;

/// Ledger configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Attempts per counter write before reporting a persistence failure
    pub max_write_attempts: u32,
    /// Base backoff between write attempts (multiplied by the attempt number)
    pub retry_backoff_ms: u64,
    /// Streak behaviour on partial completion
    pub streak_policy: StreakPolicy,
    /// Months of history kept in `monthly_impacts`
    pub monthly_history_len: usize,
    /// Actor mailbox capacity
    pub command_buffer: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: 3,
            retry_backoff_ms: 50,
            streak_policy: StreakPolicy::HoldOnIncomplete,
            monthly_history_len: 6,
            command_buffer: 64,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.max_write_attempts == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_write_attempts must be at least 1".into(),
            ));
        }
        if self.monthly_history_len == 0 {
            return Err(LedgerError::InvalidConfig(
                "monthly_history_len must be at least 1".into(),
            ));
        }
        if self.command_buffer == 0 {
            return Err(LedgerError::InvalidConfig(
                "command_buffer must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(attempt as u64))
    }
}
