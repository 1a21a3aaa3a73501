//! Image loading and region preparation
//!
//! Decodes images with the `image` crate and hands the pipeline 8-bit RGB
//! buffers. Face or landmark detection is not done here: callers pass the
//! bounding box they obtained elsewhere to [`crop_region`].
//!
//! ## Supported Formats
//!
//! JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, OpenEXR, PNM,
//! QOI, DDS and HDR.

use image::{imageops::FilterType, ImageReader, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::{
    constants::processing::ANALYSIS_EDGE,
    error::{AnalysisError, Result},
};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    /// First frame only
    Gif,
    WebP,
    Tiff,
    Bmp,
    Ico,
    Tga,
    Exr,
    /// PBM, PGM, PPM
    Pnm,
    Qoi,
    Dds,
    Hdr,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "exr" => Some(ImageFormat::Exr),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            "dds" => Some(ImageFormat::Dds),
            "hdr" => Some(ImageFormat::Hdr),
            _ => None,
        }
    }
}

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` if:
/// - The extension is not a supported format
/// - The file cannot be opened
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use season_palette::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("portrait.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), season_palette::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(AnalysisError::ImageLoadError {
            message: format!("Unknown image format for file: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let image = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    let rgb = image.to_rgb8();
    debug!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        "Loaded image"
    );
    Ok(rgb)
}

/// Resize to the square analysis size used for whole-image palettes
pub fn resize_for_analysis(image: &RgbImage) -> RgbImage {
    resize_square(image, ANALYSIS_EDGE)
}

/// Resize to `edge`×`edge`, ignoring aspect ratio
pub fn resize_square(image: &RgbImage, edge: u32) -> RgbImage {
    if image.width() == edge && image.height() == edge {
        return image.clone();
    }
    image::imageops::resize(image, edge, edge, FilterType::Triangle)
}

/// Copy out a region of interest
///
/// # Errors
///
/// Returns `AnalysisError::InvalidParameter` if the region is empty or
/// extends past the image.
pub fn crop_region(image: &RgbImage, region: Region) -> Result<RgbImage> {
    let fits = region.width > 0
        && region.height > 0
        && region.x.checked_add(region.width).is_some_and(|r| r <= image.width())
        && region.y.checked_add(region.height).is_some_and(|b| b <= image.height());

    if !fits {
        return Err(AnalysisError::invalid_parameter(
            "region",
            format!(
                "{}x{}+{}+{} outside {}x{} image",
                region.width,
                region.height,
                region.x,
                region.y,
                image.width(),
                image.height()
            ),
        ));
    }

    Ok(image::imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm",
        "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
