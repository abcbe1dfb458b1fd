//! # Per-User Actors
//!
//! Several users share one process; each gets a serialized ledger backed by
//! its own counter file.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    use su_01_impact_ledger::{
        ActionKind, FixedClock, ImpactLedgerApi, ImpactLedgerService, JsonFileCounterStore,
        LedgerConfig, LedgerError, LedgerFactory, LedgerRegistry, LedgerMetrics,
        StandingsRanking,
    };

    type FileLedger = ImpactLedgerService<JsonFileCounterStore, StandingsRanking, FixedClock>;

    struct FileFactory {
        dir: PathBuf,
        metrics: Arc<LedgerMetrics>,
    }

    impl FileFactory {
        async fn build(&self, user_id: &str) -> Result<FileLedger, LedgerError> {
            let store = JsonFileCounterStore::open(self.dir.join(format!("{user_id}.json")))
                .await
                .map_err(LedgerError::Hydration)?;
            Ok(ImpactLedgerService::hydrate(
                Arc::new(store),
                Arc::new(StandingsRanking::new(vec![50.0, 150.0, 400.0])),
                Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 22).unwrap())),
                LedgerConfig::default(),
            )
            .await?
            .with_metrics(self.metrics.clone()))
        }
    }

    #[async_trait]
    impl LedgerFactory for FileFactory {
        type Ledger = FileLedger;

        async fn create(&self, user_id: &str) -> Result<FileLedger, LedgerError> {
            self.build(user_id).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_users_are_isolated_and_serialized() {
        let dir = TempDir::new().unwrap();
        let metrics = Arc::new(LedgerMetrics::new());
        let registry = Arc::new(LedgerRegistry::new(
            FileFactory {
                dir: dir.path().to_path_buf(),
                metrics: metrics.clone(),
            },
            16,
        ));

        let mut tasks = Vec::new();
        for user in ["alice", "bob", "carol"] {
            for _ in 0..20 {
                let registry = registry.clone();
                tasks.push(tokio::spawn(async move {
                    let handle = registry.handle(user).await?;
                    handle.log_action(ActionKind::CarbonReduction, 10.0).await
                }));
            }
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(registry.active_users().await, 3);
        for user in ["alice", "bob", "carol"] {
            let state = registry.handle(user).await.unwrap().snapshot().await.unwrap();
            assert_eq!(state.stats.carbon_saved, 200.0);
            // Ahead of 50 and 150, behind 400
            assert_eq!(state.community.community_rank, 2);
            assert_eq!(state.community.percentile_ranking, 50);
        }
        assert_eq!(metrics.snapshot().actions_logged, 60);
    }

    #[tokio::test]
    async fn test_shutdown_persists_for_next_process() {
        let dir = TempDir::new().unwrap();
        let factory = || FileFactory {
            dir: dir.path().to_path_buf(),
            metrics: Arc::new(LedgerMetrics::new()),
        };

        let registry = LedgerRegistry::new(factory(), 8);
        let handle = registry.handle("alice").await.unwrap();
        handle.log_action(ActionKind::WasteReduction, 120.0).await.unwrap();
        handle.complete_challenge("energy-saver").await.unwrap();
        registry.shutdown_all().await;

        let ledger = factory().build("alice").await.unwrap();
        let state = ledger.snapshot();
        assert_eq!(state.stats.waste_diverted, 120.0);
        assert_eq!(state.total_points, 550);
    }
}
