//! Color quantization module
//!
//! Reduces a sampled pixel set to a handful of representative colors.

pub mod kmeans;

pub use kmeans::ColorQuantizer;

use crate::color::ColorSample;

/// A quantized cluster: its rounded centroid and how many pixels it holds
///
/// Clusters are created fresh by each quantization call and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub centroid: ColorSample,
    pub population: usize,
}

impl Cluster {
    /// Population as a percentage of `total`
    pub fn share(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.population as f64 / total as f64 * 100.0
        }
    }
}
