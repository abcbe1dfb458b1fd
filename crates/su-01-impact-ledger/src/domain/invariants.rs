//! Domain invariants for the Impact Ledger
//!
//! Checked by the service in debug builds after every mutation and by the test suites.

use super::entities::{LedgerState, Stats};

/// INVARIANT-1: Points Balance
/// total_points = banked + unlocked achievement points + completed challenge points.
pub fn invariant_points_balance(state: &LedgerState) -> bool {
    state.total_points == state.derived_points()
}

/// INVARIANT-2: One-Way Unlock
/// Every achievement unlocked in `before` is still unlocked in `after`.
pub fn invariant_unlock_monotonic(before: &LedgerState, after: &LedgerState) -> bool {
    before
        .achievements
        .iter()
        .filter(|a| a.is_unlocked)
        .all(|a| after.achievement(&a.id).map(|b| b.is_unlocked).unwrap_or(false))
}

/// INVARIANT-3: Non-Decreasing Stats
/// Logging non-negative values never lowers a counter.
pub fn invariant_stats_non_decreasing(before: &Stats, after: &Stats) -> bool {
    after.carbon_saved >= before.carbon_saved
        && after.waste_diverted >= before.waste_diverted
        && after.trees_planted >= before.trees_planted
}

/// INVARIANT-4: Percentile Bounds
pub fn invariant_percentile_bounds(state: &LedgerState) -> bool {
    state.community.percentile_ranking <= 100
}

/// INVARIANT-5: Non-Negative Stats
pub fn invariant_stats_non_negative(stats: &Stats) -> bool {
    stats.carbon_saved >= 0.0 && stats.waste_diverted >= 0.0
}

/// All single-state invariants
pub fn check_all(state: &LedgerState) -> bool {
    invariant_points_balance(state)
        && invariant_percentile_bounds(state)
        && invariant_stats_non_negative(&state.stats)
        && state.longest_streak >= state.streak_count
}
