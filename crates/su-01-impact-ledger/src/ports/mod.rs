//! Ports module for the Impact Ledger
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{ActionOutcome, ChallengeOutcome, ImpactLedgerApi};
pub use outbound::{keys, Clock, CommunityStanding, CounterStore, RankingProvider};
