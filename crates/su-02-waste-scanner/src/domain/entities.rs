//! # Scanner Entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Disposal category of a scanned item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    Recyclable,
    NonRecyclable,
    Compostable,
}

impl WasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recyclable => "recyclable",
            Self::NonRecyclable => "non_recyclable",
            Self::Compostable => "compostable",
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier verdict for one image
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WasteClassification {
    pub waste_type: WasteType,
    /// Human-readable item name, e.g. "Plastic Bottle"
    pub details: String,
    /// Classifier confidence in [0, 1]
    pub confidence: f32,
}

impl WasteClassification {
    pub fn new(waste_type: WasteType, details: impl Into<String>, confidence: f32) -> Self {
        Self {
            waste_type,
            details: details.into(),
            confidence,
        }
    }

    pub fn is_recyclable(&self) -> bool {
        self.waste_type == WasteType::Recyclable
    }
}

/// Raw capture handed to the classifier.
///
/// A zero width or height means the dimensions are unknown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

impl CapturedImage {
    pub fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    /// Wrap encoded image bytes, reading dimensions from a PNG header when present.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let (width, height) = png_dimensions(&bytes).unwrap_or((0, 0));
        Self::new(bytes, width, height)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Width and height from the IHDR chunk of a PNG stream.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}
