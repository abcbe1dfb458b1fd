//! Cross-subsystem integration tests

pub mod actors;
pub mod persistence;
pub mod runtime;
pub mod streaks;
