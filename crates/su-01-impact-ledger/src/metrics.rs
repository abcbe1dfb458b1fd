//! Counters for ledger activity
//!
//! Thread-safe so one collector can be shared by every per-user actor.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ledger activity counters
#[derive(Debug, Default)]
pub struct LedgerMetrics {
    pub actions_logged: AtomicU64,
    pub inputs_rejected: AtomicU64,
    pub achievements_unlocked: AtomicU64,
    pub challenges_completed: AtomicU64,
    pub period_rollovers: AtomicU64,
    pub persistence_retries: AtomicU64,
    pub persistence_failures: AtomicU64,
}

impl LedgerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_action(&self) {
        self.actions_logged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_input(&self) {
        self.inputs_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unlocks(&self, count: usize) {
        self.achievements_unlocked
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_challenge_completed(&self) {
        self.challenges_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rollover(&self) {
        self.period_rollovers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.persistence_retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persistence_failure(&self) {
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            actions_logged: self.actions_logged.load(Ordering::Relaxed),
            inputs_rejected: self.inputs_rejected.load(Ordering::Relaxed),
            achievements_unlocked: self.achievements_unlocked.load(Ordering::Relaxed),
            challenges_completed: self.challenges_completed.load(Ordering::Relaxed),
            period_rollovers: self.period_rollovers.load(Ordering::Relaxed),
            persistence_retries: self.persistence_retries.load(Ordering::Relaxed),
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`LedgerMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub actions_logged: u64,
    pub inputs_rejected: u64,
    pub achievements_unlocked: u64,
    pub challenges_completed: u64,
    pub period_rollovers: u64,
    pub persistence_retries: u64,
    pub persistence_failures: u64,
}
