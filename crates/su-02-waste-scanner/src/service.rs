//! # Waste Scanner Service
//!
//! Implements `WasteScannerApi`: validates the capture, runs the classifier
//! under a timeout and attaches recycling guidance.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::domain::entities::CapturedImage;
use crate::domain::errors::ScanError;
use crate::domain::guide::RecyclingGuide;
use crate::metrics::ScannerMetrics;
use crate::ports::inbound::{ScanReport, WasteScannerApi};
use crate::ports::outbound::WasteClassifier;

pub struct ScannerService<C: WasteClassifier> {
    classifier: Arc<C>,
    config: ScannerConfig,
    metrics: Arc<ScannerMetrics>,
}

impl<C: WasteClassifier> ScannerService<C> {
    pub fn new(classifier: Arc<C>, config: ScannerConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self {
            classifier,
            config,
            metrics: Arc::new(ScannerMetrics::new()),
        })
    }

    /// Share a metrics collector with other scanners
    pub fn with_metrics(mut self, metrics: Arc<ScannerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<ScannerMetrics> {
        Arc::clone(&self.metrics)
    }

    fn validate_image(&self, image: &CapturedImage) -> Result<(), ScanError> {
        if image.is_empty() {
            return Err(ScanError::InvalidImage("image has no data".into()));
        }
        if image.len() > self.config.max_image_bytes {
            return Err(ScanError::ImageTooLarge {
                size: image.len(),
                max: self.config.max_image_bytes,
            });
        }
        // Dimensions are either both known or both unknown
        if (image.width == 0) != (image.height == 0) {
            return Err(ScanError::InvalidImage(format!(
                "inconsistent dimensions {}x{}",
                image.width, image.height
            )));
        }
        Ok(())
    }

    async fn run_scan(&self, image: CapturedImage) -> Result<ScanReport, ScanError> {
        self.validate_image(&image)?;

        let classification = tokio::time::timeout(
            self.config.classification_timeout(),
            self.classifier.classify(&image),
        )
        .await
        .map_err(|_| ScanError::Timeout {
            timeout_ms: self.config.classification_timeout_ms,
        })??;

        if !(0.0..=1.0).contains(&classification.confidence) {
            return Err(ScanError::InvalidConfidence(classification.confidence));
        }
        if classification.confidence < self.config.min_confidence {
            return Err(ScanError::LowConfidence {
                confidence: classification.confidence,
                threshold: self.config.min_confidence,
            });
        }

        let guide = RecyclingGuide::for_classification(&classification);
        Ok(ScanReport {
            classification,
            guide,
        })
    }
}

#[async_trait]
impl<C: WasteClassifier> WasteScannerApi for ScannerService<C> {
    async fn scan(&self, image: CapturedImage) -> Result<ScanReport, ScanError> {
        debug!(bytes = image.len(), width = image.width, height = image.height, "Scanning item");

        match self.run_scan(image).await {
            Ok(report) => {
                self.metrics.record_scan(report.classification.waste_type);
                info!(
                    item = %report.classification.details,
                    waste_type = %report.classification.waste_type,
                    confidence = report.classification.confidence,
                    "Item classified"
                );
                Ok(report)
            }
            Err(e) => {
                match e {
                    ScanError::Timeout { .. } => self.metrics.record_timeout(),
                    _ => self.metrics.record_failure(),
                }
                warn!(error = %e, "Scan failed");
                Err(e)
            }
        }
    }
}
