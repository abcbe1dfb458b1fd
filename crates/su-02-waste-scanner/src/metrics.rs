//! Counters for scan activity

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::WasteType;

/// Scan activity counters, shareable across scanners
#[derive(Debug, Default)]
pub struct ScannerMetrics {
    pub scans_completed: AtomicU64,
    pub scans_failed: AtomicU64,
    pub scans_timed_out: AtomicU64,
    pub recyclable_items: AtomicU64,
}

impl ScannerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scan(&self, waste_type: WasteType) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
        if waste_type == WasteType::Recyclable {
            self.recyclable_items.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_failure(&self) {
        self.scans_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Timeouts also count as failures
    pub fn record_timeout(&self) {
        self.scans_timed_out.fetch_add(1, Ordering::Relaxed);
        self.record_failure();
    }

    pub fn snapshot(&self) -> ScannerMetricsSnapshot {
        ScannerMetricsSnapshot {
            scans_completed: self.scans_completed.load(Ordering::Relaxed),
            scans_failed: self.scans_failed.load(Ordering::Relaxed),
            scans_timed_out: self.scans_timed_out.load(Ordering::Relaxed),
            recyclable_items: self.recyclable_items.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ScannerMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScannerMetricsSnapshot {
    pub scans_completed: u64,
    pub scans_failed: u64,
    pub scans_timed_out: u64,
    pub recyclable_items: u64,
}
