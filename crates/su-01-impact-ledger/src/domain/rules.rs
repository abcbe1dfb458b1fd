//! Unlock predicates and streak rules
//!
//! Achievements unlock through an explicit table from `AchievementId` to predicate.
//! An identity with no entry never unlocks.

use super::catalog::{
    CARBON_CRUSHER_THRESHOLD, COMMUNITY_CHAMPION_PERCENTILE, WASTE_WARRIOR_THRESHOLD,
};
use super::entities::{Achievement, CommunityProgress, Stats};
use super::value_objects::{AchievementId, StreakPolicy};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

/// Predicate deciding whether an achievement should unlock
pub type UnlockPredicate = fn(&Stats, &CommunityProgress) -> bool;

/// Mapping from achievement identity to its unlock predicate
#[derive(Clone)]
pub struct PredicateTable {
    predicates: HashMap<AchievementId, UnlockPredicate>,
}

impl fmt::Debug for PredicateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.predicates.keys()).finish()
    }
}

impl PredicateTable {
    pub fn empty() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Predicates for the seeded catalog
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.insert(AchievementId::WasteWarrior, |stats, _| {
            stats.waste_diverted >= WASTE_WARRIOR_THRESHOLD
        });
        table.insert(AchievementId::CarbonCrusher, |stats, _| {
            stats.carbon_saved >= CARBON_CRUSHER_THRESHOLD
        });
        table.insert(AchievementId::CommunityChampion, |_, community| {
            community.percentile_ranking >= COMMUNITY_CHAMPION_PERCENTILE
        });
        table
    }

    pub fn insert(&mut self, id: AchievementId, predicate: UnlockPredicate) {
        self.predicates.insert(id, predicate);
    }

    pub fn is_satisfied(
        &self,
        id: &AchievementId,
        stats: &Stats,
        community: &CommunityProgress,
    ) -> bool {
        self.predicates
            .get(id)
            .map(|predicate| predicate(stats, community))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Default for PredicateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Unlock every locked achievement whose predicate now holds.
///
/// Returns the newly unlocked achievements in catalog order.
pub fn evaluate_unlocks(
    achievements: &mut [Achievement],
    table: &PredicateTable,
    stats: &Stats,
    community: &CommunityProgress,
) -> Vec<Achievement> {
    achievements
        .iter_mut()
        .filter(|a| !a.is_unlocked)
        .filter_map(|a| {
            if table.is_satisfied(&a.id, stats, community) && a.unlock() {
                Some(a.clone())
            } else {
                None
            }
        })
        .collect()
}

/// Streak after a challenge completion within the current period
pub fn streak_after_completion(current: u32, all_completed: bool, policy: StreakPolicy) -> u32 {
    if all_completed {
        return current.saturating_add(1);
    }
    match policy {
        StreakPolicy::HoldOnIncomplete => current,
        StreakPolicy::ResetOnIncomplete => 0,
    }
}

/// Streak carried into `today` when the period rolls over.
///
/// The streak survives only if the whole set was completed on the day immediately before.
pub fn streak_after_rollover(
    current: u32,
    last_completed: Option<NaiveDate>,
    today: NaiveDate,
) -> u32 {
    match last_completed {
        Some(day) if day.succ_opt() == Some(today) => current,
        _ => 0,
    }
}
