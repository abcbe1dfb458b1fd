//! # Geography
//!
//! Validated coordinates, rectangular map regions and great-circle distance.

use serde::{Deserialize, Serialize};

use super::errors::MapError;

/// Mean Earth radius used for haversine distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point. Construct through [`Coordinate::new`] to keep it in range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, MapError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(MapError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(MapError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = MapError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

/// Full height and width of a region in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Visible map rectangle centred on `center`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub span: Span,
}

impl MapRegion {
    pub fn new(center: Coordinate, latitude_delta: f64, longitude_delta: f64) -> Result<Self, MapError> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if !valid(latitude_delta) || !valid(longitude_delta) || latitude_delta > 180.0 || longitude_delta > 360.0 {
            return Err(MapError::InvalidSpan {
                latitude_delta,
                longitude_delta,
            });
        }
        Ok(Self {
            center,
            span: Span {
                latitude_delta,
                longitude_delta,
            },
        })
    }

    /// Whether `point` lies inside the rectangle, edges included.
    /// Longitude distance wraps across the antimeridian.
    pub fn contains(&self, point: &Coordinate) -> bool {
        let d_lat = (point.latitude() - self.center.latitude()).abs();
        let mut d_lon = (point.longitude() - self.center.longitude()).abs();
        if d_lon > 180.0 {
            d_lon = 360.0 - d_lon;
        }
        d_lat <= self.span.latitude_delta / 2.0 && d_lon <= self.span.longitude_delta / 2.0
    }
}
