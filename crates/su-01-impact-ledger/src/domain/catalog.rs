//! Fixed achievement and challenge catalog seeded into every ledger

use super::entities::{Achievement, DailyChallenge};
use super::value_objects::{AchievementId, ChallengeType};

pub const WASTE_WARRIOR_THRESHOLD: f64 = 100.0;
pub const CARBON_CRUSHER_THRESHOLD: f64 = 1000.0;
pub const COMMUNITY_CHAMPION_PERCENTILE: u8 = 90;

pub fn seed_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            AchievementId::WasteWarrior,
            "Waste Warrior",
            "Properly sorted 100 items",
            "medal",
            500,
        ),
        Achievement::new(
            AchievementId::CarbonCrusher,
            "Carbon Crusher",
            "Reduced carbon footprint by 1 ton",
            "leaf",
            1000,
        ),
        Achievement::new(
            AchievementId::CommunityChampion,
            "Community Champion",
            "Participated in 5 local initiatives",
            "person.3",
            750,
        ),
    ]
}

/// Challenge set handed out at the start of every period
pub fn seed_challenges() -> Vec<DailyChallenge> {
    vec![
        DailyChallenge::new(
            "zero-waste-day",
            "Zero Waste Day",
            "Don't generate any single-use plastic waste today",
            100,
            ChallengeType::Waste,
        ),
        DailyChallenge::new(
            "green-transport",
            "Green Transport",
            "Use public transport or walk instead of driving",
            75,
            ChallengeType::Transport,
        ),
        DailyChallenge::new(
            "energy-saver",
            "Energy Saver",
            "Reduce energy consumption by 20% today",
            50,
            ChallengeType::Energy,
        ),
    ]
}
