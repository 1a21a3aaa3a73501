//! Color representation, conversion and harmony
//!
//! This module holds the pixel and sample types, color space conversions,
//! harmony derivation, and mood associations used by palette reports.

pub mod conversion;
pub mod harmony;
pub mod psychology;
pub mod sample;

pub use conversion::{ColorConverter, Hsv};
pub use harmony::{HarmonyGenerator, HarmonySet};
pub use psychology::Mood;
pub use sample::{ColorSample, Rgb};
