//! # Season Palette
//!
//! A Rust crate for extracting dominant colors from portrait and outfit
//! images and classifying them into personal color seasons.
//!
//! This library provides:
//! - Skin pixel sampling from a pre-cropped face region (LAB chrominance mask)
//! - Seeded, reproducible k-means color quantization
//! - Undertone / value / chroma labelling from HSV thresholds
//! - Table-driven season lookup with a Neutral/Transitional fallback
//! - Complementary and analogous harmony suggestions
//!
//! Face detection and image decoding policy are left to the caller; the
//! pipeline consumes an `image::RgbImage` region.
//!
//! ## Example
//!
//! ```rust,no_run
//! use season_palette::{image_loader, PaletteAnalyzer, PipelineConfig};
//! use std::path::Path;
//!
//! let face = image_loader::load_image(Path::new("face_crop.jpg"))?;
//! let analyzer = PaletteAnalyzer::new(PipelineConfig::default())?;
//! let report = analyzer.analyze_skin(&face)?;
//! println!("Season: {}", report.aggregate.season);
//! for color in &report.colors {
//!     println!("{} {:.1}%", color.color.hex, color.color.percentage);
//! }
//! # Ok::<(), season_palette::AnalysisError>(())
//! ```

use image::RgbImage;
use std::path::Path;
use tracing::{debug, info};

pub mod classification;
pub mod clustering;
pub mod color;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod image_loader;
pub mod report;

pub use classification::{
    Chroma, ClassificationLabel, ColorimetricClassifier, Season, SeasonClassifier, SeasonTable,
    Undertone, Value,
};
pub use clustering::ColorQuantizer;
pub use color::{ColorConverter, ColorSample, HarmonyGenerator, HarmonySet, Mood, Rgb};
pub use config::PipelineConfig;
pub use detection::{LabBounds, PixelSampler};
pub use error::{AnalysisError, Result};
pub use report::{ColorClassification, LabeledColor, PaletteReport, RankedColor};

/// End-to-end analyzer wiring sampler, quantizer and classifiers together
///
/// Holds only immutable configuration; every call is independent.
#[derive(Debug, Clone)]
pub struct PaletteAnalyzer {
    config: PipelineConfig,
    sampler: PixelSampler,
    quantizer: ColorQuantizer,
    colorimetric: ColorimetricClassifier,
    seasons: SeasonClassifier,
    harmony: HarmonyGenerator,
}

impl PaletteAnalyzer {
    /// Create an analyzer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` if the configuration fails
    /// validation.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            sampler: PixelSampler::with_params(
                config.sampling.lab_bounds,
                config.sampling.smoothing,
            ),
            quantizer: ColorQuantizer::from_config(&config.quantization),
            colorimetric: ColorimetricClassifier::with_thresholds(config.thresholds),
            seasons: SeasonClassifier::new(config.season_table()?),
            harmony: HarmonyGenerator::new(),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze the skin inside a pre-cropped face region
    ///
    /// # Errors
    ///
    /// - `NoForegroundDetected` if no pixel passes the skin mask
    /// - `InsufficientSamples` if fewer than `min_samples` pixels pass, or
    ///   fewer than K
    pub fn analyze_skin(&self, region: &RgbImage) -> Result<PaletteReport> {
        let pixels = self.sampler.sample(region);

        if pixels.is_empty() {
            return Err(AnalysisError::NoForegroundDetected {
                reason: format!(
                    "no pixels of the {}x{} region matched the skin mask",
                    region.width(),
                    region.height()
                ),
            });
        }

        let required = self.config.sampling.min_samples;
        if pixels.len() < required {
            return Err(AnalysisError::InsufficientSamples {
                found: pixels.len(),
                required,
            });
        }

        self.analyze_pixels(&pixels)
    }

    /// Dominant palette of a whole image (outfit or scene)
    ///
    /// The image is resized to the square analysis size and every pixel is
    /// clustered.
    pub fn analyze_palette(&self, image: &RgbImage) -> Result<PaletteReport> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::NoForegroundDetected {
                reason: "image is empty".to_string(),
            });
        }

        let resized = image_loader::resize_for_analysis(image);
        let pixels = self.sampler.all_pixels(&resized);
        self.analyze_pixels(&pixels)
    }

    /// Quantize and classify an already sampled pixel set
    pub fn analyze_pixels(&self, pixels: &[Rgb]) -> Result<PaletteReport> {
        let k = self.config.quantization.clusters;
        let ranked = self.quantizer.quantize(pixels, k)?;

        let colors: Vec<LabeledColor> = ranked
            .into_iter()
            .map(|color| LabeledColor {
                classification: self.classify(color.rgb),
                mood: Mood::of(color.rgb),
                color,
            })
            .collect();

        let mean = mean_color(pixels);
        let aggregate = self.classify(mean);

        let harmonies = colors
            .iter()
            .take(self.config.harmony_count)
            .map(|c| self.harmony.harmony_set(c.color.rgb))
            .collect();

        for (rank, c) in colors.iter().enumerate() {
            debug!(
                rank,
                hex = %c.color.hex,
                percentage = c.color.percentage,
                season = %c.classification.season,
                "Palette color"
            );
        }
        info!(
            samples = pixels.len(),
            k,
            mean = %mean,
            season = %aggregate.season,
            "Palette analysis complete"
        );

        Ok(PaletteReport {
            colors,
            mean_color: RankedColor::new(mean, 100.0),
            aggregate,
            harmonies,
            sample_count: pixels.len(),
        })
    }

    /// Label a single color and resolve its season
    pub fn classify(&self, rgb: Rgb) -> ColorClassification {
        let label = self.colorimetric.classify(&ColorSample::new(rgb));
        ColorClassification::new(label, self.seasons.resolve_season(&label))
    }

    /// Complementary and analogous colors for `rgb`
    pub fn harmonies(&self, rgb: Rgb) -> HarmonySet {
        self.harmony.harmony_set(rgb)
    }
}

/// Analyze a face crop with the default configuration
pub fn analyze_skin_region(region: &RgbImage) -> Result<PaletteReport> {
    PaletteAnalyzer::new(PipelineConfig::default())?.analyze_skin(region)
}

/// Load an image and compute its whole-image palette
///
/// Uses the outfit defaults: six clusters, seed 42.
///
/// # Errors
///
/// Returns `AnalysisError` if the image cannot be loaded or has fewer pixels
/// than clusters.
pub fn analyze_image(image_path: &Path) -> Result<PaletteReport> {
    let image = image_loader::load_image(image_path)?;
    PaletteAnalyzer::new(PipelineConfig::outfit())?.analyze_palette(&image)
}

/// Rounded per-channel mean of a non-empty pixel set
fn mean_color(pixels: &[Rgb]) -> Rgb {
    if pixels.is_empty() {
        return Rgb::BLACK;
    }
    let mut sums = [0u64; 3];
    for p in pixels {
        sums[0] += p.r as u64;
        sums[1] += p.g as u64;
        sums[2] += p.b as u64;
    }
    let n = pixels.len() as f64;
    let channel = |s: u64| (s as f64 / n).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(sums[0]), channel(sums[1]), channel(sums[2]))
}
