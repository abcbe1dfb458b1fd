//! # Multi-Day Challenge Flows
//!
//! Drives one ledger through several periods with a controllable clock.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::sync::Arc;

    use su_01_impact_ledger::domain::invariants::check_all;
    use su_01_impact_ledger::{
        ActionKind, ChallengeId, FixedClock, FixedRanking, ImpactLedgerApi, ImpactLedgerService,
        InMemoryCounterStore, LedgerConfig, StreakPolicy,
    };

    type MemLedger = ImpactLedgerService<InMemoryCounterStore, FixedRanking, FixedClock>;

    const CHALLENGES: [&str; 3] = ["zero-waste-day", "green-transport", "energy-saver"];

    fn setup(policy: StreakPolicy) -> (MemLedger, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 22).unwrap()));
        let ledger = ImpactLedgerService::new(
            Arc::new(InMemoryCounterStore::new()),
            Arc::new(FixedRanking::with_percentile(0)),
            clock.clone(),
            LedgerConfig {
                streak_policy: policy,
                ..Default::default()
            },
        )
        .unwrap();
        (ledger, clock)
    }

    async fn complete(ledger: &mut MemLedger, id: &str) -> u32 {
        ledger
            .complete_challenge(&ChallengeId::new(id))
            .await
            .unwrap()
            .streak_count
    }

    #[tokio::test]
    async fn test_week_of_full_days() {
        let (mut ledger, clock) = setup(StreakPolicy::HoldOnIncomplete);

        for expected in 1..=7u32 {
            for id in CHALLENGES {
                complete(&mut ledger, id).await;
            }
            let state = ledger.snapshot();
            assert_eq!(state.streak_count, expected);
            assert_eq!(state.total_points, 225 * expected as u64);
            assert!(check_all(&state));
            clock.advance_days(1);
        }

        assert_eq!(ledger.snapshot().longest_streak, 7);
    }

    #[tokio::test]
    async fn test_partial_day_breaks_streak_at_rollover() {
        let (mut ledger, clock) = setup(StreakPolicy::HoldOnIncomplete);

        for id in CHALLENGES {
            complete(&mut ledger, id).await;
        }
        clock.advance_days(1);

        // Day two: only one challenge, streak held for now
        assert_eq!(complete(&mut ledger, "energy-saver").await, 1);
        clock.advance_days(1);

        // Day three begins; day two was incomplete
        assert!(ledger.roll_period().await.unwrap());
        let state = ledger.snapshot();
        assert_eq!(state.streak_count, 0);
        assert_eq!(state.longest_streak, 1);
        assert_eq!(state.total_points, 275);
    }

    #[tokio::test]
    async fn test_reset_policy_zeroes_on_partial_completion() {
        let (mut ledger, clock) = setup(StreakPolicy::ResetOnIncomplete);

        for id in CHALLENGES {
            complete(&mut ledger, id).await;
        }
        clock.advance_days(1);

        assert_eq!(complete(&mut ledger, "zero-waste-day").await, 0);
        assert_eq!(complete(&mut ledger, "green-transport").await, 0);
        assert_eq!(complete(&mut ledger, "energy-saver").await, 1);
    }

    #[tokio::test]
    async fn test_actions_roll_the_period_too() {
        let (mut ledger, clock) = setup(StreakPolicy::HoldOnIncomplete);
        complete(&mut ledger, "zero-waste-day").await;
        clock.advance_days(1);

        let outcome = ledger
            .log_action(ActionKind::CarbonReduction, 2.0)
            .await
            .unwrap();
        let state = outcome.snapshot;
        assert_eq!(state.period, NaiveDate::from_ymd_opt(2025, 1, 23).unwrap());
        assert!(state.challenges.iter().all(|c| !c.is_completed));
        assert_eq!(state.banked_points, 100);
        assert_eq!(state.total_points, 100);
    }

    #[tokio::test]
    async fn test_monthly_buckets_follow_the_calendar() {
        let (mut ledger, clock) = setup(StreakPolicy::HoldOnIncomplete);

        ledger.log_action(ActionKind::CarbonReduction, 5.0).await.unwrap();
        clock.advance_days(14);
        ledger.log_action(ActionKind::WasteReduction, 3.0).await.unwrap();
        ledger.log_action(ActionKind::WasteReduction, 2.0).await.unwrap();

        let state = ledger.snapshot();
        assert_eq!(state.monthly_impacts.len(), 2);
        let february = state.monthly_impacts.last().unwrap();
        assert_eq!(february.waste_diverted, 5.0);
        assert_eq!(february.actions_completed, 2);
    }
}
