//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound ports.

mod clock;
mod file_store;
mod memory_store;
mod ranking;

pub use clock::{FixedClock, SystemClock};
pub use file_store::JsonFileCounterStore;
pub use memory_store::InMemoryCounterStore;
pub use ranking::{FixedRanking, RandomRanking, StandingsRanking};
