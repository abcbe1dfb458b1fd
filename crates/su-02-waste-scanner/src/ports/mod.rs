pub mod inbound;
pub mod outbound;

pub use inbound::{ScanReport, WasteScannerApi};
pub use outbound::{ClassifierError, WasteClassifier};
