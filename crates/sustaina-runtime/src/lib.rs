//! # Sustaina Runtime
//!
//! Wires the impact ledger, waste scanner and initiative map behind the
//! `sustaina` command-line tool.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`SU_LOG_LEVEL`, `SU_JSON_LOGS`)
//! 2. Load configuration (TOML file, then `SU_*` overrides)
//! 3. Open the user's counter file and hydrate the ledger, rolling the period if the date moved on
//! 4. Run one command
//! 5. Flush pending counter writes

pub mod app;
pub mod config;

pub use app::{InitiativeListing, RuntimeRanking, ScanSummary, SustainaApp};
pub use config::{RankingConfig, RankingMode, RuntimeConfig};
