//! # Initiative Catalog
//!
//! Thread-safe store of initiatives with map queries.

use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::MapConfig;
use crate::domain::catalog::seed_initiatives;
use crate::domain::entities::{Initiative, InitiativeType};
use crate::domain::errors::MapError;
use crate::domain::geo::{Coordinate, MapRegion};

pub struct InitiativeCatalog {
    default_region: MapRegion,
    initiatives: RwLock<Vec<Initiative>>,
}

impl InitiativeCatalog {
    pub fn new(config: &MapConfig) -> Result<Self, MapError> {
        let default_region = config.region()?;
        let initiatives = if config.seed_defaults {
            seed_initiatives()?
        } else {
            Vec::new()
        };
        debug!(count = initiatives.len(), "Initiative catalog loaded");

        Ok(Self {
            default_region,
            initiatives: RwLock::new(initiatives),
        })
    }

    pub fn default_region(&self) -> MapRegion {
        self.default_region
    }

    pub fn add(&self, initiative: Initiative) -> Uuid {
        let id = initiative.id;
        info!(title = %initiative.title, kind = %initiative.kind, "Initiative added");
        self.initiatives.write().push(initiative);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<Initiative> {
        self.initiatives.read().iter().find(|i| &i.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Initiative> {
        self.initiatives.read().clone()
    }

    pub fn len(&self) -> usize {
        self.initiatives.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.initiatives.read().is_empty()
    }

    pub fn in_region(&self, region: &MapRegion) -> Vec<Initiative> {
        self.initiatives
            .read()
            .iter()
            .filter(|i| region.contains(&i.coordinate))
            .cloned()
            .collect()
    }

    /// Initiatives inside the default region
    pub fn visible(&self) -> Vec<Initiative> {
        self.in_region(&self.default_region)
    }

    pub fn by_type(&self, kind: InitiativeType) -> Vec<Initiative> {
        self.initiatives
            .read()
            .iter()
            .filter(|i| i.kind == kind)
            .cloned()
            .collect()
    }

    /// Closest initiative to `from` with its distance in km.
    pub fn nearest(&self, from: &Coordinate) -> Option<(Initiative, f64)> {
        self.initiatives
            .read()
            .iter()
            .map(|i| (i, from.distance_km(&i.coordinate)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, d)| (i.clone(), d))
    }
}
