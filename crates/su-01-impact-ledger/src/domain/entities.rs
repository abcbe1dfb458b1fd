//! Core entities for the Impact Ledger

use super::value_objects::{AchievementId, ActionKind, ChallengeId, ChallengeType, Points};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Accumulated impact counters for one user
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Carbon saved (kg CO2)
    pub carbon_saved: f64,
    /// Waste diverted from landfill
    pub waste_diverted: f64,
    /// Trees planted
    pub trees_planted: u64,
    /// Rank within the community (0 = unranked)
    pub community_rank: u32,
}

/// 2^64, the first float past `u64::MAX`
const TREE_COUNT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

impl Stats {
    /// Stats after applying an already validated action value.
    ///
    /// Returns `None` when the matching counter would overflow or stop being finite.
    pub fn checked_apply(&self, kind: ActionKind, value: f64) -> Option<Stats> {
        let mut next = self.clone();
        match kind {
            ActionKind::CarbonReduction => {
                next.carbon_saved = finite_sum(self.carbon_saved, value)?;
            }
            ActionKind::WasteReduction => {
                next.waste_diverted = finite_sum(self.waste_diverted, value)?;
            }
            ActionKind::TreePlanting => {
                // Fractional trees are dropped
                let trees = value.trunc();
                if !(0.0..TREE_COUNT_LIMIT).contains(&trees) {
                    return None;
                }
                next.trees_planted = self.trees_planted.checked_add(trees as u64)?;
            }
        }
        Some(next)
    }
}

fn finite_sum(current: f64, value: f64) -> Option<f64> {
    let sum = current + value;
    sum.is_finite().then_some(sum)
}

/// One-way unlockable badge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    /// Icon name for the presentation layer
    pub icon: String,
    pub points: Points,
    pub is_unlocked: bool,
}

impl Achievement {
    pub fn new(
        id: AchievementId,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        points: Points,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            points,
            is_unlocked: false,
        }
    }

    /// Flip to unlocked. Returns `true` only on the Locked -> Unlocked transition.
    pub fn unlock(&mut self) -> bool {
        if self.is_unlocked {
            return false;
        }
        self.is_unlocked = true;
        true
    }
}

/// Per-period completable task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    pub points: Points,
    pub kind: ChallengeType,
    pub is_completed: bool,
}

impl DailyChallenge {
    pub fn new(
        id: impl Into<ChallengeId>,
        title: impl Into<String>,
        description: impl Into<String>,
        points: Points,
        kind: ChallengeType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            points,
            kind,
            is_completed: false,
        }
    }

    /// Mark completed. Returns `true` only on the Pending -> Completed transition.
    pub fn complete(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        true
    }
}

/// Community-wide figures shown next to the user's own stats.
///
/// `percentile_ranking` is recomputed on every action, never accumulated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityProgress {
    pub total_participants: u64,
    pub community_rank: u32,
    pub carbon_saved: f64,
    pub waste_diverted: f64,
    /// Percentile in [0, 100]
    pub percentile_ranking: u8,
}

/// Impact aggregated over one calendar month
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyImpact {
    /// First day of the month
    pub month: NaiveDate,
    pub carbon_saved: f64,
    pub waste_diverted: f64,
    pub actions_completed: u32,
}

impl MonthlyImpact {
    pub fn empty(month: NaiveDate) -> Self {
        Self {
            month,
            carbon_saved: 0.0,
            waste_diverted: 0.0,
            actions_completed: 0,
        }
    }

    /// Normalize any date to the first day of its month
    pub fn month_of(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    pub fn record(&mut self, kind: ActionKind, value: f64) {
        match kind {
            ActionKind::CarbonReduction => self.carbon_saved += value,
            ActionKind::WasteReduction => self.waste_diverted += value,
            ActionKind::TreePlanting => {}
        }
        self.actions_completed = self.actions_completed.saturating_add(1);
    }
}

/// Complete in-memory state of one user's ledger.
///
/// Cloned out as a read-only snapshot for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub stats: Stats,
    pub achievements: Vec<Achievement>,
    pub challenges: Vec<DailyChallenge>,
    pub community: CommunityProgress,
    /// Most recent month last
    pub monthly_impacts: Vec<MonthlyImpact>,
    pub streak_count: u32,
    pub longest_streak: u32,
    pub total_points: Points,
    /// Challenge points carried over from closed periods
    pub banked_points: Points,
    /// Day the current challenge set belongs to
    pub period: NaiveDate,
    /// Last day on which every challenge was completed
    pub last_completed_date: Option<NaiveDate>,
}

impl LedgerState {
    pub fn new(
        achievements: Vec<Achievement>,
        challenges: Vec<DailyChallenge>,
        period: NaiveDate,
    ) -> Self {
        Self {
            stats: Stats::default(),
            achievements,
            challenges,
            community: CommunityProgress::default(),
            monthly_impacts: Vec::new(),
            streak_count: 0,
            longest_streak: 0,
            total_points: 0,
            banked_points: 0,
            period,
            last_completed_date: None,
        }
    }

    pub fn unlocked_points(&self) -> Points {
        self.achievements
            .iter()
            .filter(|a| a.is_unlocked)
            .map(|a| a.points)
            .sum()
    }

    pub fn completed_challenge_points(&self) -> Points {
        self.challenges
            .iter()
            .filter(|c| c.is_completed)
            .map(|c| c.points)
            .sum()
    }

    /// Total points derived from the parts, independent of `total_points`
    pub fn derived_points(&self) -> Points {
        self.banked_points + self.unlocked_points() + self.completed_challenge_points()
    }

    pub fn all_challenges_completed(&self) -> bool {
        !self.challenges.is_empty() && self.challenges.iter().all(|c| c.is_completed)
    }

    pub fn achievement(&self, id: &AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| &a.id == id)
    }

    pub fn challenge(&self, id: &ChallengeId) -> Option<&DailyChallenge> {
        self.challenges.iter().find(|c| &c.id == id)
    }

    /// Record an action into the bucket for `today`, trimming history to `max_months`.
    pub fn record_monthly(&mut self, today: NaiveDate, kind: ActionKind, value: f64, max_months: usize) {
        let month = MonthlyImpact::month_of(today);
        match self.monthly_impacts.iter_mut().find(|m| m.month == month) {
            Some(bucket) => bucket.record(kind, value),
            None => {
                let mut bucket = MonthlyImpact::empty(month);
                bucket.record(kind, value);
                self.monthly_impacts.push(bucket);
                self.monthly_impacts.sort_by_key(|m| m.month);
            }
        }

        if self.monthly_impacts.len() > max_months {
            let excess = self.monthly_impacts.len() - max_months;
            self.monthly_impacts.drain(..excess);
        }
    }
}
