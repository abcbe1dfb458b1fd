//! Domain module for the initiative map

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod geo;

pub use entities::{Initiative, InitiativeType};
pub use errors::MapError;
pub use geo::{Coordinate, MapRegion, Span};
