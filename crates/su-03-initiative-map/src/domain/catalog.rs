//! Seeded initiatives

use super::entities::{Initiative, InitiativeType};
use super::errors::MapError;
use super::geo::Coordinate;

pub const DEFAULT_CENTER: (f64, f64) = (37.7749, -122.4194);
pub const DEFAULT_SPAN: f64 = 0.05;

pub fn seed_initiatives() -> Result<Vec<Initiative>, MapError> {
    let (lat, lon) = DEFAULT_CENTER;
    Ok(vec![Initiative::new(
        "Community Solar Project",
        "Solar panel installation for community center",
        Coordinate::new(lat, lon)?,
        InitiativeType::Solar,
    )?])
}
