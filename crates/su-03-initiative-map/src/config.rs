//! # Map Configuration

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{DEFAULT_CENTER, DEFAULT_SPAN};
use crate::domain::errors::MapError;
use crate::domain::geo::{Coordinate, MapRegion};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    /// Start the catalog with the built-in initiatives
    pub seed_defaults: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: DEFAULT_CENTER.0,
            center_longitude: DEFAULT_CENTER.1,
            latitude_delta: DEFAULT_SPAN,
            longitude_delta: DEFAULT_SPAN,
            seed_defaults: true,
        }
    }
}

impl MapConfig {
    /// Default region; also validates the config.
    pub fn region(&self) -> Result<MapRegion, MapError> {
        MapRegion::new(
            Coordinate::new(self.center_latitude, self.center_longitude)?,
            self.latitude_delta,
            self.longitude_delta,
        )
    }
}
