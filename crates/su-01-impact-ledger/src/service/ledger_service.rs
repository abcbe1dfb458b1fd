//! Impact Ledger Service
//!
//! Owns one user's `LedgerState` and implements `ImpactLedgerApi`.
//!
//! Every mutation follows the same shape:
//! 1. Validate and compute everything fallible that has no side effects
//! 2. Apply the change in memory
//! 3. Stage the affected counters
//! 4. Write staged counters through with retry
//!
//! A write that still fails after the configured attempts is reported as
//! `LedgerError::Persistence`. The in-memory change stays applied and the staged
//! counters remain queued for `flush()`; until then memory is ahead of the store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::LedgerConfig;
use crate::domain::catalog::{seed_achievements, seed_challenges};
use crate::domain::entities::{CommunityProgress, LedgerState, Stats};
use crate::domain::errors::{LedgerError, StoreError};
use crate::domain::invariants;
use crate::domain::rules::{
    evaluate_unlocks, streak_after_completion, streak_after_rollover, PredicateTable,
};
use crate::domain::value_objects::{ActionKind, ChallengeId};
use crate::metrics::LedgerMetrics;
use crate::ports::{
    keys, ActionOutcome, ChallengeOutcome, Clock, CommunityStanding, CounterStore,
    ImpactLedgerApi, RankingProvider,
};

/// Impact Ledger service for a single user
pub struct ImpactLedgerService<S, R, C>
where
    S: CounterStore,
    R: RankingProvider,
    C: Clock,
{
    store: Arc<S>,
    ranking: Arc<R>,
    clock: Arc<C>,
    config: LedgerConfig,
    predicates: PredicateTable,
    state: LedgerState,
    /// Counters written in memory but not yet acknowledged by the store
    pending: BTreeMap<String, f64>,
    metrics: Arc<LedgerMetrics>,
}

impl<S, R, C> ImpactLedgerService<S, R, C>
where
    S: CounterStore,
    R: RankingProvider,
    C: Clock,
{
    /// Create a ledger with fresh state, ignoring anything already in the store.
    pub fn new(
        store: Arc<S>,
        ranking: Arc<R>,
        clock: Arc<C>,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        config.validate()?;
        let state = LedgerState::new(seed_achievements(), seed_challenges(), clock.today());

        Ok(Self {
            store,
            ranking,
            clock,
            config,
            predicates: PredicateTable::standard(),
            state,
            pending: BTreeMap::new(),
            metrics: Arc::new(LedgerMetrics::new()),
        })
    }

    /// Create a ledger whose state is rebuilt from the store.
    ///
    /// Absent counters read as zero. Total points are re-derived from the
    /// persisted unlock and completion flags; a disagreeing stored total is
    /// logged and replaced.
    pub async fn hydrate(
        store: Arc<S>,
        ranking: Arc<R>,
        clock: Arc<C>,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        let mut service = Self::new(store, ranking, clock, config)?;
        service.load_state().await?;

        let today = service.clock.today();
        if service.roll_to(today) {
            service.stage_counters();
            if let Err(e) = service.persist().await {
                // Hydration still succeeds; the rollover stays pending
                warn!(error = %e, "Could not persist period rollover during hydration");
            }
        }

        info!(
            period = %service.state.period,
            total_points = service.state.total_points,
            streak = service.state.streak_count,
            "Ledger hydrated"
        );

        Ok(service)
    }

    /// Replace the unlock predicate table.
    pub fn with_predicates(mut self, predicates: PredicateTable) -> Self {
        self.predicates = predicates;
        self
    }

    /// Share a metrics collector with other ledgers.
    pub fn with_metrics(mut self, metrics: Arc<LedgerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<LedgerMetrics> {
        Arc::clone(&self.metrics)
    }

    async fn read_counter(&self, key: &str) -> Result<f64, LedgerError> {
        let value = self
            .store
            .get(key)
            .await
            .map_err(LedgerError::Hydration)?
            .unwrap_or(0.0);

        if !value.is_finite() || value < 0.0 {
            return Err(LedgerError::Hydration(StoreError::Corrupt {
                key: key.to_string(),
                reason: format!("expected a non-negative number, got {}", value),
            }));
        }
        Ok(value)
    }

    async fn read_day(&self, key: &str) -> Result<Option<NaiveDate>, LedgerError> {
        let raw = self.read_counter(key).await?;
        if raw == 0.0 {
            return Ok(None);
        }
        day_from_number(raw).map(Some).ok_or_else(|| {
            LedgerError::Hydration(StoreError::Corrupt {
                key: key.to_string(),
                reason: format!("{} is not a valid day number", raw),
            })
        })
    }

    async fn load_state(&mut self) -> Result<(), LedgerError> {
        let stats = Stats {
            carbon_saved: self.read_counter(keys::CARBON_SAVED).await?,
            waste_diverted: self.read_counter(keys::WASTE_DIVERTED).await?,
            trees_planted: self.read_counter(keys::TREES_PLANTED).await? as u64,
            community_rank: 0,
        };

        let period = self
            .read_day(keys::CURRENT_PERIOD)
            .await?
            .unwrap_or_else(|| self.clock.today());
        let period_number = day_number(period);

        let mut achievements = seed_achievements();
        for achievement in achievements.iter_mut() {
            let flag = self
                .read_counter(&keys::achievement(achievement.id.key()))
                .await?;
            achievement.is_unlocked = flag >= 1.0;
        }

        let mut challenges = seed_challenges();
        for challenge in challenges.iter_mut() {
            let completed_on = self
                .read_counter(&keys::challenge(challenge.id.as_str()))
                .await?;
            challenge.is_completed = completed_on == period_number;
        }

        let mut state = LedgerState::new(achievements, challenges, period);
        state.stats = stats;
        state.banked_points = self.read_counter(keys::BANKED_POINTS).await? as u64;
        state.streak_count = self.read_counter(keys::STREAK_COUNT).await? as u32;
        state.longest_streak = (self.read_counter(keys::LONGEST_STREAK).await? as u32)
            .max(state.streak_count);
        state.last_completed_date = self.read_day(keys::LAST_COMPLETED_DATE).await?;
        state.total_points = state.derived_points();

        let stored_total = self.read_counter(keys::TOTAL_POINTS).await? as u64;
        if stored_total != state.total_points {
            warn!(
                stored = stored_total,
                derived = state.total_points,
                "Stored total points disagree with unlock/completion flags; using derived value"
            );
        }

        let standing = self.ranking.standing(&state.stats)?;
        apply_standing(&mut state, standing);

        self.state = state;
        Ok(())
    }

    /// Move to `today`'s period if it is later than the current one.
    ///
    /// Completed challenge points are banked, the challenge set is reseeded and the
    /// streak survives only if yesterday's set was fully completed.
    fn roll_to(&mut self, today: NaiveDate) -> bool {
        if today <= self.state.period {
            return false;
        }

        let banked = self.state.completed_challenge_points();
        let previous_streak = self.state.streak_count;

        self.state.banked_points += banked;
        self.state.streak_count =
            streak_after_rollover(previous_streak, self.state.last_completed_date, today);
        self.state.challenges = seed_challenges();
        let previous_period = std::mem::replace(&mut self.state.period, today);

        self.metrics.record_rollover();
        info!(
            from = %previous_period,
            to = %today,
            banked_points = banked,
            streak = self.state.streak_count,
            "Started new challenge period"
        );
        if previous_streak > 0 && self.state.streak_count == 0 {
            info!(previous_streak, "Streak broken");
        }

        true
    }

    /// Queue every counter for the next write.
    fn stage_counters(&mut self) {
        let state = &self.state;
        let mut staged = vec![
            (keys::CARBON_SAVED.to_string(), state.stats.carbon_saved),
            (keys::WASTE_DIVERTED.to_string(), state.stats.waste_diverted),
            (keys::TREES_PLANTED.to_string(), state.stats.trees_planted as f64),
            (keys::TOTAL_POINTS.to_string(), state.total_points as f64),
            (keys::BANKED_POINTS.to_string(), state.banked_points as f64),
            (keys::STREAK_COUNT.to_string(), state.streak_count as f64),
            (keys::LONGEST_STREAK.to_string(), state.longest_streak as f64),
            (keys::CURRENT_PERIOD.to_string(), day_number(state.period)),
        ];

        if let Some(day) = state.last_completed_date {
            staged.push((keys::LAST_COMPLETED_DATE.to_string(), day_number(day)));
        }
        for achievement in state.achievements.iter().filter(|a| a.is_unlocked) {
            staged.push((keys::achievement(achievement.id.key()), 1.0));
        }
        for challenge in state.challenges.iter().filter(|c| c.is_completed) {
            staged.push((
                keys::challenge(challenge.id.as_str()),
                day_number(state.period),
            ));
        }

        self.pending.extend(staged);
    }

    /// Write pending counters, retrying with linear backoff.
    async fn persist(&mut self) -> Result<(), LedgerError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let entries: Vec<(String, f64)> = self
            .pending
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        let mut attempt = 1;
        loop {
            match self.store.set_many(&entries).await {
                Ok(()) => {
                    debug!(counters = entries.len(), attempt, "Counters persisted");
                    self.pending.clear();
                    return Ok(());
                }
                Err(e) if attempt < self.config.max_write_attempts => {
                    self.metrics.record_retry();
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts = self.config.max_write_attempts,
                        "Counter write failed, retrying"
                    );
                    tokio::time::sleep(self.config.backoff_for(attempt)).await;
                    attempt += 1;
                }
                Err(e) => {
                    self.metrics.record_persistence_failure();
                    error!(
                        error = %e,
                        pending = self.pending.len(),
                        "Counter write failed, state kept in memory until next flush"
                    );
                    return Err(LedgerError::Persistence {
                        source: e,
                        pending_keys: self.pending.keys().cloned().collect(),
                    });
                }
            }
        }
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            invariants::check_all(&self.state),
            "ledger invariants violated: {:?}",
            self.state
        );
    }
}

#[async_trait]
impl<S, R, C> ImpactLedgerApi for ImpactLedgerService<S, R, C>
where
    S: CounterStore + 'static,
    R: RankingProvider + 'static,
    C: Clock + 'static,
{
    async fn log_action(
        &mut self,
        kind: ActionKind,
        value: f64,
    ) -> Result<ActionOutcome, LedgerError> {
        if !value.is_finite() || value < 0.0 {
            self.metrics.record_rejected_input();
            warn!(kind = %kind, value, "Rejected action value");
            return Err(LedgerError::InvalidInput { value });
        }

        let Some(stats) = self.state.stats.checked_apply(kind, value) else {
            self.metrics.record_rejected_input();
            warn!(kind = %kind, value, "Rejected action value: counter would overflow");
            return Err(LedgerError::InvalidInput { value });
        };

        // Rank against the prospective stats before touching state
        let standing = self.ranking.standing(&stats)?;

        let today = self.clock.today();
        self.roll_to(today);

        self.state.stats = stats;
        self.state
            .record_monthly(today, kind, value, self.config.monthly_history_len);
        apply_standing(&mut self.state, standing);

        let newly_unlocked = evaluate_unlocks(
            &mut self.state.achievements,
            &self.predicates,
            &self.state.stats,
            &self.state.community,
        );
        for achievement in &newly_unlocked {
            self.state.total_points += achievement.points;
            info!(
                achievement = %achievement.id,
                points = achievement.points,
                total_points = self.state.total_points,
                "Achievement unlocked"
            );
        }

        self.metrics.record_action();
        self.metrics.record_unlocks(newly_unlocked.len());
        debug!(
            kind = %kind,
            value,
            carbon_saved = self.state.stats.carbon_saved,
            waste_diverted = self.state.stats.waste_diverted,
            trees_planted = self.state.stats.trees_planted,
            percentile = self.state.community.percentile_ranking,
            "Action logged"
        );
        self.debug_check_invariants();

        self.stage_counters();
        self.persist().await?;

        Ok(ActionOutcome {
            newly_unlocked,
            snapshot: self.state.clone(),
        })
    }

    async fn complete_challenge(
        &mut self,
        id: &ChallengeId,
    ) -> Result<ChallengeOutcome, LedgerError> {
        // Every period reseeds the same ids, so lookup before rolling is equivalent
        if self.state.challenge(id).is_none() {
            warn!(challenge = %id, "Unknown challenge");
            return Err(LedgerError::ChallengeNotFound { id: id.clone() });
        }

        let rolled = self.roll_to(self.clock.today());

        let period = self.state.period;
        let (newly_completed, points) = {
            let challenge = self
                .state
                .challenges
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| LedgerError::ChallengeNotFound { id: id.clone() })?;
            (challenge.complete(), challenge.points)
        };

        if !newly_completed {
            debug!(challenge = %id, "Challenge already completed");
            if rolled {
                self.stage_counters();
                self.persist().await?;
            }
            return Ok(ChallengeOutcome {
                completed: false,
                points_awarded: 0,
                streak_count: self.state.streak_count,
                snapshot: self.state.clone(),
            });
        }

        self.state.total_points += points;
        let all_completed = self.state.all_challenges_completed();
        self.state.streak_count = streak_after_completion(
            self.state.streak_count,
            all_completed,
            self.config.streak_policy,
        );
        if all_completed {
            self.state.last_completed_date = Some(period);
            self.state.longest_streak = self.state.longest_streak.max(self.state.streak_count);
            info!(
                period = %period,
                streak = self.state.streak_count,
                "All challenges completed"
            );
        }

        self.metrics.record_challenge_completed();
        info!(
            challenge = %id,
            points,
            total_points = self.state.total_points,
            "Challenge completed"
        );
        self.debug_check_invariants();

        self.stage_counters();
        self.persist().await?;

        Ok(ChallengeOutcome {
            completed: true,
            points_awarded: points,
            streak_count: self.state.streak_count,
            snapshot: self.state.clone(),
        })
    }

    async fn roll_period(&mut self) -> Result<bool, LedgerError> {
        let rolled = self.roll_to(self.clock.today());
        if rolled {
            self.debug_check_invariants();
            self.stage_counters();
            self.persist().await?;
        }
        Ok(rolled)
    }

    async fn flush(&mut self) -> Result<(), LedgerError> {
        self.persist().await
    }

    fn snapshot(&self) -> LedgerState {
        self.state.clone()
    }

    fn pending_writes(&self) -> usize {
        self.pending.len()
    }
}

fn apply_standing(state: &mut LedgerState, standing: CommunityStanding) {
    state.stats.community_rank = standing.rank;
    state.community = CommunityProgress {
        total_participants: standing.total_participants,
        community_rank: standing.rank,
        carbon_saved: state.stats.carbon_saved,
        waste_diverted: state.stats.waste_diverted,
        percentile_ranking: standing.percentile.min(100),
    };
}

/// Days since CE, as stored in the counter store
pub fn day_number(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

pub fn day_from_number(raw: f64) -> Option<NaiveDate> {
    if raw.fract() != 0.0 || raw < 1.0 || raw > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(raw as i32)
}
