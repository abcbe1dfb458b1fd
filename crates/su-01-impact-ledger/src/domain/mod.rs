//! Domain module for the Impact Ledger
//!
//! Entities, value objects, the seeded catalog, unlock/streak rules, errors and invariants.
//! No I/O happens here.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod rules;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use rules::{evaluate_unlocks, PredicateTable, UnlockPredicate};
pub use value_objects::*;
