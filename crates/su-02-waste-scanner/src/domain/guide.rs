//! # Recycling Guide
//!
//! Turns a classification into the guidance shown to the user.

use serde::Serialize;

use super::entities::{WasteClassification, WasteType};

pub const GUIDE_TITLE: &str = "Recycling Guide";
pub const RECYCLABLE_MESSAGE: &str = "This item is recyclable! 🎉";
pub const NOT_RECYCLABLE_MESSAGE: &str = "This item is not recyclable.";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecyclingGuide {
    pub title: &'static str,
    /// "Item: <details>"
    pub item_line: String,
    pub recyclable: bool,
    pub message: &'static str,
    pub instructions: Vec<&'static str>,
}

impl RecyclingGuide {
    pub fn for_classification(classification: &WasteClassification) -> Self {
        let recyclable = classification.is_recyclable();
        let instructions = match classification.waste_type {
            WasteType::Recyclable => vec![
                "Empty and rinse the item",
                "Place it in the recycling bin",
            ],
            WasteType::Compostable => vec![
                "Add it to your compost or green-waste bin",
                "Keep plastic packaging out of the compost",
            ],
            WasteType::NonRecyclable => vec!["Dispose of it with general waste"],
        };

        Self {
            title: GUIDE_TITLE,
            item_line: format!("Item: {}", classification.details),
            recyclable,
            message: if recyclable {
                RECYCLABLE_MESSAGE
            } else {
                NOT_RECYCLABLE_MESSAGE
            },
            instructions,
        }
    }
}
