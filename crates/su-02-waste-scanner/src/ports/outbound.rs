//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{CapturedImage, WasteClassification};

/// Error from a classifier backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Unrecognized item")]
    Unrecognized,
}

/// Image classification backend (Driven Port)
#[async_trait]
pub trait WasteClassifier: Send + Sync {
    async fn classify(&self, image: &CapturedImage) -> Result<WasteClassification, ClassifierError>;
}
