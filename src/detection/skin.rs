//! Skin pixel sampling by LAB chrominance masking
//!
//! Implements foreground sampling that:
//! - Converts the region to 8-bit LAB
//! - Keeps pixels whose L, a, b all fall inside closed bounds
//! - Optionally smooths the binary mask with a 3x3 open-then-close pass
//! - Drops exactly-black pixels (the masked-out background sentinel)
//!
//! The region is expected to be already localized by an external face or
//! landmark detector.

use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    color::{ColorConverter, Rgb},
    constants::skin_mask::{LAB_LOWER, LAB_UPPER, MORPH_KERNEL_SIZE},
    AnalysisError, Result,
};

const MASK_ON: u8 = 255;
const MASK_OFF: u8 = 0;

/// Closed per-channel interval in 8-bit LAB encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl Default for LabBounds {
    fn default() -> Self {
        Self {
            lower: LAB_LOWER,
            upper: LAB_UPPER,
        }
    }
}

impl LabBounds {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, lab: [u8; 3]) -> bool {
        (0..3).all(|c| lab[c] >= self.lower[c] && lab[c] <= self.upper[c])
    }

    /// Check that every lower bound is at most its upper bound
    pub fn validate(&self) -> Result<()> {
        for (c, name) in ["L", "a", "b"].iter().enumerate() {
            if self.lower[c] > self.upper[c] {
                return Err(AnalysisError::invalid_parameter(
                    format!("lab_bounds.{}", name),
                    format!("{} > {}", self.lower[c], self.upper[c]),
                ));
            }
        }
        Ok(())
    }
}

/// Foreground pixel sampler using a LAB color-range mask
#[derive(Debug, Clone)]
pub struct PixelSampler {
    converter: ColorConverter,
    bounds: LabBounds,
    smoothing: bool,
}

impl Default for PixelSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSampler {
    /// Create a sampler with the default skin bounds and smoothing enabled
    pub fn new() -> Self {
        Self::with_params(LabBounds::default(), true)
    }

    /// Create a sampler with custom bounds
    pub fn with_params(bounds: LabBounds, smoothing: bool) -> Self {
        Self {
            converter: ColorConverter::new(),
            bounds,
            smoothing,
        }
    }

    pub fn bounds(&self) -> LabBounds {
        self.bounds
    }

    /// Extract foreground pixels using the sampler's configured bounds
    pub fn sample(&self, region: &RgbImage) -> Vec<Rgb> {
        self.extract_foreground(region, self.bounds.lower, self.bounds.upper)
    }

    /// Extract pixels whose LAB encoding lies within `[lab_lower, lab_upper]`
    ///
    /// Returns an empty vector when nothing survives the mask; deciding
    /// whether that is an error is left to the caller.
    pub fn extract_foreground(
        &self,
        region: &RgbImage,
        lab_lower: [u8; 3],
        lab_upper: [u8; 3],
    ) -> Vec<Rgb> {
        let bounds = LabBounds::new(lab_lower, lab_upper);

        // Step 1: Color-range mask
        let mut mask = self.segment_by_lab(region, &bounds);

        // Step 2: Morphological refinement
        if self.smoothing {
            mask = morphological_refinement(&mask);
        }

        // Step 3: Collect masked pixels, dropping the black sentinel
        let pixels: Vec<Rgb> = region
            .pixels()
            .zip(mask.pixels())
            .filter(|(_, m)| m[0] == MASK_ON)
            .map(|(px, _)| Rgb::from(*px))
            .filter(|rgb| !rgb.is_black())
            .collect();

        debug!(
            region_pixels = region.width() as usize * region.height() as usize,
            foreground = pixels.len(),
            smoothing = self.smoothing,
            "Extracted foreground pixels"
        );

        pixels
    }

    /// Every pixel in the region, without masking
    ///
    /// Used for garment and whole-image palettes, where black is a real color
    /// rather than a background sentinel.
    pub fn all_pixels(&self, region: &RgbImage) -> Vec<Rgb> {
        region.pixels().map(|px| Rgb::from(*px)).collect()
    }

    fn segment_by_lab(&self, region: &RgbImage, bounds: &LabBounds) -> GrayImage {
        GrayImage::from_fn(region.width(), region.height(), |x, y| {
            let lab = self.converter.rgb_to_lab8(Rgb::from(*region.get_pixel(x, y)));
            Luma([if bounds.contains(lab) { MASK_ON } else { MASK_OFF }])
        })
    }
}

/// Opening removes isolated positives, closing fills isolated holes
fn morphological_refinement(mask: &GrayImage) -> GrayImage {
    let opened = dilate(&erode(mask));
    erode(&dilate(&opened))
}

/// 3x3 rectangular erosion; neighbours outside the image are ignored
fn erode(mask: &GrayImage) -> GrayImage {
    apply_kernel(mask, |on, total| on == total)
}

/// 3x3 rectangular dilation; neighbours outside the image are ignored
fn dilate(mask: &GrayImage) -> GrayImage {
    apply_kernel(mask, |on, _| on > 0)
}

/// Apply `rule(on_count, neighbourhood_size)` at every pixel
fn apply_kernel<F>(mask: &GrayImage, rule: F) -> GrayImage
where
    F: Fn(usize, usize) -> bool,
{
    let (width, height) = mask.dimensions();
    let radius = (MORPH_KERNEL_SIZE / 2) as i64;

    GrayImage::from_fn(width, height, |x, y| {
        let mut on = 0;
        let mut total = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                total += 1;
                if mask.get_pixel(nx as u32, ny as u32)[0] == MASK_ON {
                    on += 1;
                }
            }
        }

        Luma([if rule(on, total) { MASK_ON } else { MASK_OFF }])
    })
}
