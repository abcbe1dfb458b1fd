//! Placeholder classifier
//!
//! Stands in for a real vision model: waits, then reports every item as a
//! recyclable plastic bottle.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::entities::{CapturedImage, WasteClassification, WasteType};
use crate::ports::outbound::{ClassifierError, WasteClassifier};

pub const PLACEHOLDER_ITEM: &str = "Plastic Bottle";

#[derive(Clone, Debug)]
pub struct PlaceholderClassifier {
    delay: Duration,
}

impl PlaceholderClassifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for PlaceholderClassifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl WasteClassifier for PlaceholderClassifier {
    async fn classify(&self, image: &CapturedImage) -> Result<WasteClassification, ClassifierError> {
        debug!(bytes = image.len(), "Placeholder classification");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(WasteClassification::new(
            WasteType::Recyclable,
            PLACEHOLDER_ITEM,
            1.0,
        ))
    }
}
