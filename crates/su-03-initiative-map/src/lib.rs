//! # SU-03: Initiative Map
//!
//! Local climate initiatives (solar, reforestation, waste collection, water
//! conservation) pinned to coordinates, with region, type and proximity queries.
//!
//! ## Invariants
//!
//! - Every `Coordinate` lies within latitude [-90, 90] and longitude [-180, 180]
//! - A `MapRegion` span is positive in both directions

pub mod config;
pub mod domain;
pub mod service;

pub use config::MapConfig;
pub use domain::{Coordinate, Initiative, InitiativeType, MapError, MapRegion, Span};
pub use service::InitiativeCatalog;
