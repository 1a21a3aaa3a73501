//! Result types handed to the UI and report layers
//!
//! Colors are carried internally as integer RGB and converted to hex only
//! here, at the boundary.

use serde::{Deserialize, Serialize};

use crate::{
    classification::{Chroma, ClassificationLabel, Season, Undertone, Value},
    color::{ColorConverter, ColorSample, HarmonySet, Mood, Rgb},
};

/// One quantized color with its share of the sampled pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedColor {
    /// `#rrggbb`
    pub hex: String,
    pub rgb: Rgb,
    /// Share of sampled pixels, 0-100
    pub percentage: f64,
}

impl RankedColor {
    pub fn new(rgb: Rgb, percentage: f64) -> Self {
        Self {
            hex: ColorConverter::new().rgb_to_hex(rgb),
            rgb,
            percentage,
        }
    }

    pub fn sample(&self) -> ColorSample {
        ColorSample::new(self.rgb)
    }
}

/// Colorimetric labels plus the resolved season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorClassification {
    pub undertone: Undertone,
    pub value: Value,
    pub chroma: Chroma,
    pub season: Season,
}

impl ColorClassification {
    pub fn new(label: ClassificationLabel, season: Season) -> Self {
        Self {
            undertone: label.undertone,
            value: label.value,
            chroma: label.chroma,
            season,
        }
    }

    pub fn label(&self) -> ClassificationLabel {
        ClassificationLabel::new(self.undertone, self.value, self.chroma)
    }
}

/// A ranked color with its classification and mood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledColor {
    #[serde(flatten)]
    pub color: RankedColor,
    pub classification: ColorClassification,
    pub mood: Mood,
}

/// Complete analysis of one image region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteReport {
    /// Ranked colors, most populous first
    pub colors: Vec<LabeledColor>,
    /// Mean of all sampled pixels
    pub mean_color: RankedColor,
    /// Classification of the mean color
    pub aggregate: ColorClassification,
    /// Harmony suggestions for the leading colors
    pub harmonies: Vec<HarmonySet>,
    /// Pixels fed to the quantizer
    pub sample_count: usize,
}

impl PaletteReport {
    pub fn dominant(&self) -> Option<&LabeledColor> {
        self.colors.first()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
