//! Implementations of the classifier port.

mod placeholder;

pub use placeholder::{PlaceholderClassifier, PLACEHOLDER_ITEM};
