//! # Runtime Wiring
//!
//! Scanner, initiative map and ledger together, configured from TOML the way
//! the `sustaina` binary is.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    use su_01_impact_ledger::{AchievementId, ActionKind, FixedClock, StreakPolicy};
    use su_03_initiative_map::{Coordinate, InitiativeType};
    use sustaina_runtime::{RuntimeConfig, SustainaApp};

    fn config(dir: &TempDir, extra: &str) -> RuntimeConfig {
        let toml = format!(
            "data_dir = {:?}\nuser_id = \"noga\"\n\n[scanner]\nclassification_delay_ms = 0\n\n{}",
            dir.path().join("data").display().to_string(),
            extra
        );
        let config = RuntimeConfig::parse(&toml).unwrap();
        config.validate().unwrap();
        config
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()))
    }

    #[tokio::test]
    async fn test_hundred_scans_unlock_waste_warrior() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("item.jpg");
        std::fs::write(&image, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let mut app = SustainaApp::open_with_clock(config(&dir, ""), clock())
            .await
            .unwrap();

        let mut unlocked = Vec::new();
        for _ in 0..100 {
            let summary = app.scan(&image, true).await.unwrap();
            if let Some(outcome) = summary.logged {
                unlocked.extend(outcome.newly_unlocked);
            }
        }

        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, AchievementId::WasteWarrior);
        assert_eq!(app.status().total_points, 500);
        app.close().await.unwrap();

        assert!(dir.path().join("data").join("noga.json").exists());
    }

    #[tokio::test]
    async fn test_community_champion_via_standings() {
        let dir = TempDir::new().unwrap();
        let others: Vec<String> = (1..=19).map(|i| format!("{}.0", i * 10)).collect();
        let extra = format!(
            "[ranking]\nmode = \"standings\"\ncommunity_carbon = [{}]\n",
            others.join(", ")
        );

        let mut app = SustainaApp::open_with_clock(config(&dir, &extra), clock())
            .await
            .unwrap();

        // 19 others at 10..190; 195 beats all of them: 19 * 100 / 20 = 95th percentile
        let outcome = app.log_action(ActionKind::CarbonReduction, 195.0).await.unwrap();
        assert_eq!(outcome.snapshot.community.percentile_ranking, 95);
        assert_eq!(outcome.snapshot.community.community_rank, 1);
        assert_eq!(outcome.newly_unlocked.len(), 1);
        assert_eq!(outcome.newly_unlocked[0].id, AchievementId::CommunityChampion);
        assert_eq!(outcome.snapshot.total_points, 750);
    }

    #[tokio::test]
    async fn test_ledger_section_reaches_the_service() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, "[ledger]\nstreak_policy = \"reset_on_incomplete\"\n");
        assert_eq!(config.ledger.streak_policy, StreakPolicy::ResetOnIncomplete);

        let mut app = SustainaApp::open_with_clock(config, clock()).await.unwrap();
        let outcome = app.complete_challenge("zero-waste-day").await.unwrap();
        assert_eq!(outcome.streak_count, 0);
        assert_eq!(outcome.points_awarded, 100);
    }

    #[tokio::test]
    async fn test_map_section_moves_the_visible_region() {
        let dir = TempDir::new().unwrap();
        let config = config(
            &dir,
            "[map]\ncenter_latitude = 51.5072\ncenter_longitude = -0.1276\n",
        );
        let app = SustainaApp::open_with_clock(config, clock()).await.unwrap();

        assert!(app.initiatives(None, None).is_empty());

        let london = Coordinate::new(51.5072, -0.1276).unwrap();
        let all = app.initiatives(Some(InitiativeType::Solar), Some(london));
        assert_eq!(all.len(), 1);
        assert!(all[0].distance_km.unwrap() > 8000.0);
    }
}
