//! # Scanner Errors

use thiserror::Error;

use crate::ports::outbound::ClassifierError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScanError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Image too large: {size} bytes (max {max})")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Classifier failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Classification timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Classifier answered with a confidence outside [0, 1]
    #[error("Invalid classification confidence: {0}")]
    InvalidConfidence(f32),

    #[error("Confidence {confidence} below threshold {threshold}")]
    LowConfidence { confidence: f32, threshold: f32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
