//! # Map Errors

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapError {
    #[error("Invalid latitude {0} (must be within [-90, 90])")]
    InvalidLatitude(f64),

    #[error("Invalid longitude {0} (must be within [-180, 180])")]
    InvalidLongitude(f64),

    #[error("Invalid span {latitude_delta}x{longitude_delta}")]
    InvalidSpan {
        latitude_delta: f64,
        longitude_delta: f64,
    },

    #[error("Initiative title must not be empty")]
    EmptyTitle,

    #[error("Unknown initiative type: {0}")]
    UnknownType(String),
}
