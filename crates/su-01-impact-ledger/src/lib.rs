//! # SU-01: Impact Ledger
//!
//! Tracks a user's environmental impact: logged actions, one-way achievements,
//! daily challenges, streaks and community standing.
//!
//! ## Architecture
//!
//! - **Domain** (`domain/`): entities, the seeded catalog, the unlock predicate
//!   table, streak rules and invariants. Pure, no I/O.
//! - **Ports** (`ports/`): `ImpactLedgerApi` (inbound); `CounterStore`,
//!   `RankingProvider` and `Clock` (outbound).
//! - **Service** (`service/`): `ImpactLedgerService` implementing the API with
//!   write-through persistence and retry; `LedgerActor` / `LedgerRegistry` for
//!   one serialized writer per user.
//! - **Adapters** (`adapters/`): in-memory and JSON-file counter stores,
//!   standings-based, fixed and random ranking, system and fixed clocks.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: `total_points = banked + unlocked achievements + completed challenges`
//! - **INVARIANT-2**: an unlocked achievement never locks again
//! - **INVARIANT-3**: logging non-negative values never lowers a counter
//!
//! ## Usage Example
//!
//! ```ignore
//! use su_01_impact_ledger::{
//!     ActionKind, ImpactLedgerApi, ImpactLedgerService, InMemoryCounterStore,
//!     LedgerConfig, StandingsRanking, SystemClock,
//! };
//! use std::sync::Arc;
//!
//! let mut ledger = ImpactLedgerService::hydrate(
//!     Arc::new(InMemoryCounterStore::new()),
//!     Arc::new(StandingsRanking::new(vec![120.0, 480.0])),
//!     Arc::new(SystemClock),
//!     LedgerConfig::default(),
//! )
//! .await?;
//!
//! let outcome = ledger.log_action(ActionKind::WasteReduction, 100.0).await?;
//! assert_eq!(outcome.newly_unlocked.len(), 1);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{
    FixedClock, FixedRanking, InMemoryCounterStore, JsonFileCounterStore, RandomRanking,
    StandingsRanking, SystemClock,
};
pub use config::LedgerConfig;
pub use domain::entities::*;
pub use domain::errors::{LedgerError, RankingError, StoreError};
pub use domain::rules::{PredicateTable, UnlockPredicate};
pub use domain::value_objects::*;
pub use metrics::{LedgerMetrics, MetricsSnapshot};
pub use ports::{
    keys, ActionOutcome, ChallengeOutcome, Clock, CommunityStanding, CounterStore,
    ImpactLedgerApi, RankingProvider,
};
pub use service::{
    spawn_ledger, ImpactLedgerService, LedgerActor, LedgerCommand, LedgerFactory, LedgerHandle,
    LedgerRegistry,
};
