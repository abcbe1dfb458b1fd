//! # Scanner Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::errors::ScanError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Largest accepted capture in bytes
    pub max_image_bytes: usize,
    /// Delay the placeholder classifier waits before answering
    pub classification_delay_ms: u64,
    /// Upper bound on a single classification
    pub classification_timeout_ms: u64,
    /// Verdicts below this confidence are rejected
    pub min_confidence: f32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 10 * 1024 * 1024,
            classification_delay_ms: 1000,
            classification_timeout_ms: 10_000,
            min_confidence: 0.0,
        }
    }
}

impl ScannerConfig {
    /// Config with no placeholder delay.
    pub fn for_testing() -> Self {
        Self {
            classification_delay_ms: 0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.max_image_bytes == 0 {
            return Err(ScanError::InvalidConfig(
                "max_image_bytes must be positive".into(),
            ));
        }
        if self.classification_timeout_ms == 0 {
            return Err(ScanError::InvalidConfig(
                "classification_timeout_ms must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ScanError::InvalidConfig(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }

    pub fn classification_delay(&self) -> Duration {
        Duration::from_millis(self.classification_delay_ms)
    }

    pub fn classification_timeout(&self) -> Duration {
        Duration::from_millis(self.classification_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classification_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_confidence_out_of_range() {
        let config = ScannerConfig {
            min_confidence: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));
    }
}
