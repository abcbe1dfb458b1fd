//! Service Layer
//!
//! The ledger service orchestrating domain rules and ports, and the per-user
//! actor that serializes access to it.

pub mod actor;
pub mod ledger_service;

pub use actor::{spawn_ledger, LedgerActor, LedgerCommand, LedgerFactory, LedgerHandle, LedgerRegistry};
pub use ledger_service::ImpactLedgerService;
