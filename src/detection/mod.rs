//! Foreground detection module
//!
//! Selects the pixels that belong to the subject (skin) inside a region
//! already localized by an external face detector.

pub mod skin;

pub use skin::{LabBounds, PixelSampler};
