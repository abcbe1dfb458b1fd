//! # Initiative Entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::MapError;
use super::geo::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeType {
    Solar,
    Reforestation,
    WasteCollection,
    WaterConservation,
}

impl InitiativeType {
    pub const ALL: [InitiativeType; 4] = [
        Self::Solar,
        Self::Reforestation,
        Self::WasteCollection,
        Self::WaterConservation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Reforestation => "reforestation",
            Self::WasteCollection => "waste_collection",
            Self::WaterConservation => "water_conservation",
        }
    }

    /// Map marker symbol
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Solar => "sun.max",
            Self::Reforestation => "leaf",
            Self::WasteCollection => "trash",
            Self::WaterConservation => "drop",
        }
    }
}

impl fmt::Display for InitiativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitiativeType {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| MapError::UnknownType(s.to_string()))
    }
}

/// A local climate initiative pinned on the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub coordinate: Coordinate,
    pub kind: InitiativeType,
}

impl Initiative {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        coordinate: Coordinate,
        kind: InitiativeType,
    ) -> Result<Self, MapError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(MapError::EmptyTitle);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: description.into(),
            coordinate,
            kind,
        })
    }
}
