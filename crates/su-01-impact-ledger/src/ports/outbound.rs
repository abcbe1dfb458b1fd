//! Outbound Ports (Driven Ports)
//!
//! Dependencies the ledger needs from its environment: durable counters,
//! community ranking and the calendar.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::Stats;
use crate::domain::errors::{RankingError, StoreError};

/// Counter keys written by the ledger
pub mod keys {
    pub const CARBON_SAVED: &str = "impact.carbonSaved";
    pub const WASTE_DIVERTED: &str = "impact.wasteDiverted";
    pub const TREES_PLANTED: &str = "impact.treesPlanted";
    pub const TOTAL_POINTS: &str = "impact.totalPoints";
    pub const BANKED_POINTS: &str = "impact.bankedPoints";
    pub const STREAK_COUNT: &str = "impact.streakCount";
    pub const LONGEST_STREAK: &str = "impact.longestStreak";
    /// Day number (days since CE) of the last fully completed period
    pub const LAST_COMPLETED_DATE: &str = "impact.lastCompletedDate";
    /// Day number of the period the active challenge set belongs to
    pub const CURRENT_PERIOD: &str = "impact.currentPeriod";

    /// Unlock flag for an achievement (1.0 = unlocked)
    pub fn achievement(key: &str) -> String {
        format!("impact.achievement.{}", key)
    }

    /// Day number on which a challenge was completed
    pub fn challenge(id: &str) -> String {
        format!("impact.challenge.{}", id)
    }
}

/// Durable scalar key-value storage (Driven Port)
///
/// Absent keys read as `None`. Implementations must make `set` durable before
/// returning `Ok`.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError>;

    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError>;

    /// Write several counters. Stops at the first failure.
    async fn set_many(&self, entries: &[(String, f64)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, *value).await?;
        }
        Ok(())
    }
}

/// A user's position within the community
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommunityStanding {
    pub total_participants: u64,
    /// 1-based rank
    pub rank: u32,
    /// Percentile in [0, 100]
    pub percentile: u8,
}

/// Community ranking source (Driven Port)
pub trait RankingProvider: Send + Sync {
    fn standing(&self, stats: &Stats) -> Result<CommunityStanding, RankingError>;
}

/// Calendar source (Driven Port)
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
