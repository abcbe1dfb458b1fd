//! Domain module for the waste scanner

pub mod entities;
pub mod errors;
pub mod guide;

pub use entities::{CapturedImage, WasteClassification, WasteType};
pub use errors::ScanError;
pub use guide::RecyclingGuide;
