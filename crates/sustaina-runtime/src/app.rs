//! # Application Wiring
//!
//! Builds every subsystem from a [`RuntimeConfig`] and exposes the commands
//! the CLI runs against them.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use su_01_impact_ledger::{
    ActionKind, ActionOutcome, ChallengeId, ChallengeOutcome, Clock, CommunityStanding,
    ImpactLedgerApi, ImpactLedgerService, JsonFileCounterStore, LedgerState, RandomRanking,
    RankingError, RankingProvider, StandingsRanking, Stats, SystemClock,
};
use su_02_waste_scanner::{
    CapturedImage, PlaceholderClassifier, ScanReport, ScannerService, WasteScannerApi,
};
use su_03_initiative_map::{Coordinate, Initiative, InitiativeCatalog, InitiativeType};

use crate::config::{RankingMode, RuntimeConfig};

/// Ranking source chosen by configuration
pub enum RuntimeRanking {
    Standings(StandingsRanking),
    Random(RandomRanking),
}

impl RuntimeRanking {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        match config.ranking.mode {
            RankingMode::Standings => {
                Self::Standings(StandingsRanking::new(config.ranking.community_carbon.clone()))
            }
            RankingMode::Random => {
                Self::Random(RandomRanking::new(config.ranking.total_participants))
            }
        }
    }
}

impl RankingProvider for RuntimeRanking {
    fn standing(&self, stats: &Stats) -> Result<CommunityStanding, RankingError> {
        match self {
            Self::Standings(ranking) => ranking.standing(stats),
            Self::Random(ranking) => ranking.standing(stats),
        }
    }
}

/// Outcome of `scan`, with the ledger entry when the item was logged
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub report: ScanReport,
    pub logged: Option<ActionOutcome>,
}

/// An initiative with its distance from the query point, if one was given
#[derive(Debug, Serialize)]
pub struct InitiativeListing {
    pub initiative: Initiative,
    pub distance_km: Option<f64>,
}

pub type RuntimeLedger<C> = ImpactLedgerService<JsonFileCounterStore, RuntimeRanking, C>;

pub struct SustainaApp<C: Clock + 'static = SystemClock> {
    config: RuntimeConfig,
    ledger: RuntimeLedger<C>,
    scanner: ScannerService<PlaceholderClassifier>,
    catalog: InitiativeCatalog,
}

impl SustainaApp<SystemClock> {
    pub async fn open(config: RuntimeConfig) -> Result<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock)).await
    }
}

impl<C: Clock + 'static> SustainaApp<C> {
    pub async fn open_with_clock(config: RuntimeConfig, clock: Arc<C>) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;

        let store_path = config.store_path();
        let store = JsonFileCounterStore::open(&store_path)
            .await
            .with_context(|| format!("opening counter store {}", store_path.display()))?;
        debug!(path = %store_path.display(), "Counter store opened");

        let ledger = ImpactLedgerService::hydrate(
            Arc::new(store),
            Arc::new(RuntimeRanking::from_config(&config)),
            clock,
            config.ledger.clone(),
        )
        .await
        .context("loading impact ledger")?;

        let scanner = ScannerService::new(
            Arc::new(PlaceholderClassifier::new(
                config.scanner.classification_delay(),
            )),
            config.scanner.clone(),
        )?;
        let catalog = InitiativeCatalog::new(&config.map)?;

        info!(user = %config.user_id, "Sustaina ready");
        Ok(Self {
            config,
            ledger,
            scanner,
            catalog,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn status(&self) -> LedgerState {
        self.ledger.snapshot()
    }

    pub async fn log_action(&mut self, kind: ActionKind, value: f64) -> Result<ActionOutcome> {
        Ok(self.ledger.log_action(kind, value).await?)
    }

    pub async fn complete_challenge(&mut self, id: &str) -> Result<ChallengeOutcome> {
        Ok(self.ledger.complete_challenge(&ChallengeId::new(id)).await?)
    }

    /// Start a new period if the date has moved on. Returns whether it rolled.
    pub async fn new_period(&mut self) -> Result<bool> {
        Ok(self.ledger.roll_period().await?)
    }

    /// Classify the image at `path`. With `log_item`, a recyclable item also
    /// counts as one unit of waste diverted.
    pub async fn scan(&mut self, path: &Path, log_item: bool) -> Result<ScanSummary> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading image {}", path.display()))?;
        let report = self.scanner.scan(CapturedImage::from_bytes(bytes)).await?;

        let logged = if log_item && report.classification.is_recyclable() {
            Some(self.ledger.log_action(ActionKind::WasteReduction, 1.0).await?)
        } else {
            None
        };

        Ok(ScanSummary { report, logged })
    }

    /// Initiatives in the default region, or every initiative sorted by
    /// distance when `near` is given.
    pub fn initiatives(
        &self,
        kind: Option<InitiativeType>,
        near: Option<Coordinate>,
    ) -> Vec<InitiativeListing> {
        let candidates = match near {
            Some(_) => self.catalog.all(),
            None => self.catalog.visible(),
        };

        let mut listings: Vec<InitiativeListing> = candidates
            .into_iter()
            .filter(|i| kind.map_or(true, |k| i.kind == k))
            .map(|initiative| InitiativeListing {
                distance_km: near.map(|from| from.distance_km(&initiative.coordinate)),
                initiative,
            })
            .collect();

        if near.is_some() {
            listings.sort_by(|a, b| {
                a.distance_km
                    .unwrap_or(f64::MAX)
                    .total_cmp(&b.distance_km.unwrap_or(f64::MAX))
            });
        }
        listings
    }

    /// Write any counters still pending.
    pub async fn close(mut self) -> Result<()> {
        if self.ledger.pending_writes() > 0 {
            self.ledger
                .flush()
                .await
                .context("flushing pending ledger writes")?;
        }
        Ok(())
    }
}
