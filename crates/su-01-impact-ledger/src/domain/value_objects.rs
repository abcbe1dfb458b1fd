//! Value objects for the Impact Ledger
//!
//! Identifiers and closed enumerations shared by entities, rules and ports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points awarded by achievements and challenges
pub type Points = u64;

/// Kind of impact action a user can log
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Carbon reduction, measured in kilograms of CO2
    CarbonReduction,
    /// Waste diverted from landfill, measured in items or kilograms
    WasteReduction,
    /// Trees planted; fractional values are truncated
    TreePlanting,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::CarbonReduction,
        ActionKind::WasteReduction,
        ActionKind::TreePlanting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CarbonReduction => "carbon_reduction",
            ActionKind::WasteReduction => "waste_reduction",
            ActionKind::TreePlanting => "tree_planting",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carbon_reduction" | "carbon" => Ok(ActionKind::CarbonReduction),
            "waste_reduction" | "waste" => Ok(ActionKind::WasteReduction),
            "tree_planting" | "trees" => Ok(ActionKind::TreePlanting),
            other => Err(format!("unknown action kind: {}", other)),
        }
    }
}

/// Stable achievement identity.
///
/// Unlock predicates are keyed by this identifier, never by display title.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    WasteWarrior,
    CarbonCrusher,
    CommunityChampion,
    /// Catalog entry without a registered predicate
    Custom(String),
}

impl AchievementId {
    /// Storage key fragment for this achievement
    pub fn key(&self) -> &str {
        match self {
            AchievementId::WasteWarrior => "waste_warrior",
            AchievementId::CarbonCrusher => "carbon_crusher",
            AchievementId::CommunityChampion => "community_champion",
            AchievementId::Custom(name) => name,
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Daily challenge identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChallengeId(String);

impl ChallengeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChallengeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Category of a daily challenge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Waste,
    Energy,
    Transport,
    Education,
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waste => "waste",
            Self::Energy => "energy",
            Self::Transport => "transport",
            Self::Education => "education",
        })
    }
}

/// What happens to the streak when a challenge completes but the period's set is still partial
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Leave the streak untouched until the period closes
    #[default]
    HoldOnIncomplete,
    /// Reset the streak to zero on every partial completion
    ResetOnIncomplete,
}
