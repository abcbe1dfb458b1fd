//! # Runtime Configuration
//!
//! One TOML file covering every subsystem. Missing sections take their
//! defaults; `SU_DATA_DIR` and `SU_USER_ID` override the file.
//!
//! ```toml
//! data_dir = "./data"
//! user_id = "local"
//!
//! [ledger]
//! streak_policy = "reset_on_incomplete"
//!
//! [ranking]
//! mode = "standings"
//! community_carbon = [120.0, 480.0, 1500.0]
//!
//! [scanner]
//! classification_delay_ms = 0
//!
//! [map]
//! latitude_delta = 0.1
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use su_01_impact_ledger::LedgerConfig;
use su_02_waste_scanner::ScannerConfig;
use su_03_initiative_map::MapConfig;

/// Where community standing comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Rank against `community_carbon`
    #[default]
    Standings,
    /// Random percentile out of `total_participants`
    Random,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub mode: RankingMode,
    /// Carbon saved by the other community members
    pub community_carbon: Vec<f64>,
    pub total_participants: u64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            mode: RankingMode::Standings,
            community_carbon: Vec::new(),
            total_participants: 1000,
        }
    }
}

/// Complete runtime configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory holding one counter file per user
    pub data_dir: PathBuf,
    pub user_id: String,
    pub ledger: LedgerConfig,
    pub ranking: RankingConfig,
    pub scanner: ScannerConfig,
    pub map: MapConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            user_id: "local".to_string(),
            ledger: LedgerConfig::default(),
            ranking: RankingConfig::default(),
            scanner: ScannerConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load from `path` (defaults when `None`), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::parse(&content)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `SU_DATA_DIR` / `SU_USER_ID` from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("SU_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(user) = lookup("SU_USER_ID") {
            self.user_id = user;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.user_id.is_empty()
            || !self
                .user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!(
                "user_id must be non-empty and use only letters, digits, '-' or '_': {:?}",
                self.user_id
            );
        }
        if self.ranking.community_carbon.iter().any(|c| !c.is_finite() || *c < 0.0) {
            bail!("ranking.community_carbon must hold finite non-negative values");
        }
        if self.ranking.mode == RankingMode::Random && self.ranking.total_participants == 0 {
            bail!("ranking.total_participants must be positive in random mode");
        }
        self.ledger.validate()?;
        self.scanner.validate()?;
        self.map.region()?;
        Ok(())
    }

    /// Counter file for the configured user
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.user_id))
    }
}
