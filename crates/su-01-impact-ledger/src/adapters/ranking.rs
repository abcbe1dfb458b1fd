//! RankingProvider adapters
//!
//! - `StandingsRanking`: ranks against the community's carbon totals
//! - `FixedRanking`: constant standing, for tests and offline use
//! - `RandomRanking`: random percentile, for demos without community data

use parking_lot::RwLock;
use rand::Rng;

use crate::domain::entities::Stats;
use crate::domain::errors::RankingError;
use crate::ports::{CommunityStanding, RankingProvider};

/// Ranks a user by carbon saved against the other participants' totals.
///
/// rank = 1 + participants with strictly more carbon saved;
/// percentile = floor(100 * participants with strictly less / everyone).
#[derive(Debug, Default)]
pub struct StandingsRanking {
    others: RwLock<Vec<f64>>,
}

impl StandingsRanking {
    pub fn new(others: Vec<f64>) -> Self {
        Self {
            others: RwLock::new(others),
        }
    }

    /// Replace the community totals, e.g. after a periodic sync.
    pub fn update(&self, others: Vec<f64>) {
        *self.others.write() = others;
    }

    pub fn participants(&self) -> usize {
        self.others.read().len() + 1
    }
}

impl RankingProvider for StandingsRanking {
    fn standing(&self, stats: &Stats) -> Result<CommunityStanding, RankingError> {
        let others = self.others.read();
        let mine = stats.carbon_saved;

        let ahead = others.iter().filter(|&&c| c > mine).count();
        let behind = others.iter().filter(|&&c| c < mine).count();
        let total = others.len() + 1;

        Ok(CommunityStanding {
            total_participants: total as u64,
            rank: (ahead + 1) as u32,
            percentile: ((behind * 100) / total) as u8,
        })
    }
}

/// Always returns the same standing
#[derive(Clone, Copy, Debug)]
pub struct FixedRanking {
    standing: CommunityStanding,
}

impl FixedRanking {
    pub fn new(standing: CommunityStanding) -> Self {
        Self { standing }
    }

    pub fn with_percentile(percentile: u8) -> Self {
        Self::new(CommunityStanding {
            total_participants: 1,
            rank: 1,
            percentile: percentile.min(100),
        })
    }
}

impl RankingProvider for FixedRanking {
    fn standing(&self, _stats: &Stats) -> Result<CommunityStanding, RankingError> {
        Ok(self.standing)
    }
}

/// Random percentile in [0, 100]; rank advances by one from the user's current rank.
#[derive(Clone, Copy, Debug)]
pub struct RandomRanking {
    total_participants: u64,
}

impl RandomRanking {
    pub fn new(total_participants: u64) -> Self {
        Self { total_participants }
    }
}

impl Default for RandomRanking {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl RankingProvider for RandomRanking {
    fn standing(&self, stats: &Stats) -> Result<CommunityStanding, RankingError> {
        if self.total_participants == 0 {
            return Err(RankingError::NoStandings);
        }
        Ok(CommunityStanding {
            total_participants: self.total_participants,
            rank: stats.community_rank.saturating_add(1),
            percentile: rand::thread_rng().gen_range(0..=100),
        })
    }
}
