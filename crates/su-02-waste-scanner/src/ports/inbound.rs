//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{CapturedImage, WasteClassification};
use crate::domain::errors::ScanError;
use crate::domain::guide::RecyclingGuide;

/// Result of a successful scan
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScanReport {
    pub classification: WasteClassification,
    pub guide: RecyclingGuide,
}

#[async_trait]
pub trait WasteScannerApi: Send + Sync {
    /// Validate, classify and attach guidance.
    async fn scan(&self, image: CapturedImage) -> Result<ScanReport, ScanError>;
}
