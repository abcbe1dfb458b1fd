//! # Persistence Across Restarts
//!
//! A ledger backed by the JSON counter file is dropped and rebuilt with
//! `hydrate`, the way the CLI does on every invocation.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    use su_01_impact_ledger::{
        keys, ActionKind, ChallengeId, CounterStore, FixedClock, FixedRanking, ImpactLedgerApi,
        ImpactLedgerService, InMemoryCounterStore, JsonFileCounterStore, LedgerConfig,
        LedgerError, StoreError,
    };

    type FileLedger = ImpactLedgerService<JsonFileCounterStore, FixedRanking, FixedClock>;

    const CHALLENGES: [&str; 3] = ["zero-waste-day", "green-transport", "energy-saver"];

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    async fn open(path: &Path, today: NaiveDate) -> FileLedger {
        let store = JsonFileCounterStore::open(path).await.unwrap();
        ImpactLedgerService::hydrate(
            Arc::new(store),
            Arc::new(FixedRanking::with_percentile(10)),
            Arc::new(FixedClock::new(today)),
            LedgerConfig::default(),
        )
        .await
        .unwrap()
    }

    async fn complete_all(ledger: &mut FileLedger) {
        for id in CHALLENGES {
            ledger.complete_challenge(&ChallengeId::new(id)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_fresh_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = open(&dir.path().join("user.json"), day(22)).await;

        let state = ledger.snapshot();
        assert_eq!(state.total_points, 0);
        assert_eq!(state.streak_count, 0);
        assert!(state.achievements.iter().all(|a| !a.is_unlocked));
        assert_eq!(state.period, day(22));
    }

    #[tokio::test]
    async fn test_stats_and_unlocks_survive_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");

        {
            let mut ledger = open(&path, day(22)).await;
            ledger.log_action(ActionKind::WasteReduction, 60.0).await.unwrap();
            ledger.log_action(ActionKind::WasteReduction, 40.0).await.unwrap();
            ledger.log_action(ActionKind::CarbonReduction, 12.5).await.unwrap();
            ledger.log_action(ActionKind::TreePlanting, 3.0).await.unwrap();
        }

        let ledger = open(&path, day(22)).await;
        let state = ledger.snapshot();
        assert_eq!(state.stats.waste_diverted, 100.0);
        assert_eq!(state.stats.carbon_saved, 12.5);
        assert_eq!(state.stats.trees_planted, 3);
        assert_eq!(state.total_points, 500);
        assert_eq!(state.community.percentile_ranking, 10);
    }

    #[tokio::test]
    async fn test_streak_carries_over_consecutive_days() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");

        {
            let mut ledger = open(&path, day(22)).await;
            complete_all(&mut ledger).await;
            assert_eq!(ledger.snapshot().streak_count, 1);
        }

        {
            let mut ledger = open(&path, day(23)).await;
            let state = ledger.snapshot();
            assert_eq!(state.period, day(23));
            assert_eq!(state.streak_count, 1);
            assert_eq!(state.banked_points, 225);
            assert_eq!(state.total_points, 225);
            assert!(state.challenges.iter().all(|c| !c.is_completed));

            complete_all(&mut ledger).await;
            let state = ledger.snapshot();
            assert_eq!(state.streak_count, 2);
            assert_eq!(state.longest_streak, 2);
            assert_eq!(state.total_points, 450);
        }

        // Day 24 is skipped entirely
        let ledger = open(&path, day(25)).await;
        let state = ledger.snapshot();
        assert_eq!(state.streak_count, 0);
        assert_eq!(state.longest_streak, 2);
        assert_eq!(state.total_points, 450);
    }

    #[tokio::test]
    async fn test_partial_day_survives_same_day_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");

        {
            let mut ledger = open(&path, day(22)).await;
            ledger
                .complete_challenge(&ChallengeId::new("green-transport"))
                .await
                .unwrap();
        }

        let mut ledger = open(&path, day(22)).await;
        let outcome = ledger
            .complete_challenge(&ChallengeId::new("green-transport"))
            .await
            .unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.snapshot.total_points, 75);
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_to_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileCounterStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_tampered_total_is_rederived() {
        let store = Arc::new(InMemoryCounterStore::with_values([
            (keys::WASTE_DIVERTED, 150.0),
            (keys::TOTAL_POINTS, 99_999.0),
        ]));
        store
            .set(&keys::achievement("waste_warrior"), 1.0)
            .await
            .unwrap();

        let ledger = ImpactLedgerService::hydrate(
            store,
            Arc::new(FixedRanking::with_percentile(0)),
            Arc::new(FixedClock::new(day(22))),
            LedgerConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(ledger.snapshot().total_points, 500);
    }

    #[tokio::test]
    async fn test_failed_write_is_flushed_later() {
        let store = Arc::new(InMemoryCounterStore::new());
        let mut ledger = ImpactLedgerService::new(
            store.clone(),
            Arc::new(FixedRanking::with_percentile(0)),
            Arc::new(FixedClock::new(day(22))),
            LedgerConfig {
                retry_backoff_ms: 0,
                ..Default::default()
            },
        )
        .unwrap();

        store.fail_next_writes(usize::MAX);
        let err = ledger
            .log_action(ActionKind::CarbonReduction, 1000.0)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence { .. }));
        assert_eq!(ledger.snapshot().total_points, 1000);
        assert!(ledger.pending_writes() > 0);

        store.fail_next_writes(0);
        ledger.flush().await.unwrap();
        assert_eq!(ledger.pending_writes(), 0);

        let rebuilt = ImpactLedgerService::hydrate(
            store,
            Arc::new(FixedRanking::with_percentile(0)),
            Arc::new(FixedClock::new(day(22))),
            LedgerConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(rebuilt.snapshot().stats.carbon_saved, 1000.0);
        assert_eq!(rebuilt.snapshot().total_points, 1000);
    }
}
