//! Colorimetric and season classification module
//!
//! A color is first labelled by undertone, value and chroma, then the label
//! is looked up in a season table.

pub mod colorimetric;
pub mod season;

pub use colorimetric::{
    Chroma, ClassificationLabel, ClassificationThresholds, ColorimetricClassifier, Undertone,
    Value,
};
pub use season::{Season, SeasonClassifier, SeasonRule, SeasonTable};
