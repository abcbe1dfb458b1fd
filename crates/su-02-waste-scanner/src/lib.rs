//! # SU-02: Waste Scanner
//!
//! Identifies a captured item and tells the user how to dispose of it.
//!
//! ## Architecture
//!
//! - **Domain**: `WasteType`, `WasteClassification`, `CapturedImage`, `RecyclingGuide`
//! - **Ports**: `WasteScannerApi` (inbound), `WasteClassifier` (outbound)
//! - **Service**: `ScannerService` validates the capture, classifies it under a
//!   timeout and builds the guide
//! - **Metrics**: `ScannerMetrics` counts completed, failed and timed-out scans
//! - **Adapters**: `PlaceholderClassifier`, which answers "Plastic Bottle" after a delay
//!
//! ## Usage Example
//!
//! ```ignore
//! use su_02_waste_scanner::{CapturedImage, PlaceholderClassifier, ScannerConfig, ScannerService, WasteScannerApi};
//! use std::sync::Arc;
//!
//! let config = ScannerConfig::default();
//! let scanner = ScannerService::new(
//!     Arc::new(PlaceholderClassifier::new(config.classification_delay())),
//!     config,
//! )?;
//! let report = scanner.scan(CapturedImage::from_bytes(bytes)).await?;
//! println!("{}", report.guide.message);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{PlaceholderClassifier, PLACEHOLDER_ITEM};
pub use config::ScannerConfig;
pub use domain::{CapturedImage, RecyclingGuide, ScanError, WasteClassification, WasteType};
pub use metrics::{ScannerMetrics, ScannerMetricsSnapshot};
pub use ports::{ClassifierError, ScanReport, WasteClassifier, WasteScannerApi};
pub use service::ScannerService;
