//! Color space conversion utilities
//!
//! Provides conversions used across the pipeline:
//! - RGB to HSV (hue in degrees) and back
//! - RGB to CIE Lab (D65), plus the 8-bit Lab encoding used by skin masks
//! - Hex color representation

use palette::{FromColor, Hsv as PaletteHsv, Lab, RgbHue, Srgb};
use serde::{Deserialize, Serialize};

use crate::{color::Rgb, AnalysisError, Result};

/// HSV triple with hue on the 0-360 degree scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees, [0, 360)
    pub hue: f32,
    /// Max-normalised brightness, [0, 1]
    pub value: f32,
    /// HSV saturation, [0, 1]
    pub chroma: f32,
}

impl Hsv {
    pub fn new(hue: f32, value: f32, chroma: f32) -> Self {
        Self { hue, value, chroma }
    }
}

/// Stateless color converter
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert an RGB color to HSV
    ///
    /// Uses the max/min formula in `f64`, multiplying before dividing so that
    /// hues landing exactly on a classification boundary (30, 210, 330) are
    /// exact. Achromatic colors report hue 0.
    pub fn rgb_to_hsv(&self, rgb: Rgb) -> Hsv {
        let (r, g, b) = (rgb.r as f64, rgb.g as f64, rgb.b as f64);
        let max = r.max(g).max(b);
        let delta = max - r.min(g).min(b);

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            (60.0 * (g - b) / delta).rem_euclid(360.0)
        } else if max == g {
            60.0 * (b - r) / delta + 120.0
        } else {
            60.0 * (r - g) / delta + 240.0
        };
        let chroma = if max == 0.0 { 0.0 } else { delta / max };

        Hsv {
            hue: hue as f32,
            value: (max / 255.0) as f32,
            chroma: chroma as f32,
        }
    }

    /// Convert untrusted integer channels to HSV
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidColor` if any channel is outside [0, 255].
    pub fn rgb_to_hsv_checked(&self, r: i64, g: i64, b: i64) -> Result<Hsv> {
        Ok(self.rgb_to_hsv(Rgb::try_new(r, g, b)?))
    }

    /// Convert HSV back to integer RGB, rounding each channel to nearest
    pub fn hsv_to_rgb(&self, hsv: Hsv) -> Rgb {
        let color = PaletteHsv::new(
            RgbHue::from_degrees(hsv.hue),
            hsv.chroma.clamp(0.0, 1.0),
            hsv.value.clamp(0.0, 1.0),
        );
        from_srgb(Srgb::from_color(color))
    }

    /// Convert RGB to CIE Lab under D65
    pub fn rgb_to_lab(&self, rgb: Rgb) -> Lab {
        Lab::from_color(to_srgb(rgb))
    }

    /// Convert RGB to 8-bit encoded Lab: `[L*·255/100, a*+128, b*+128]`
    ///
    /// Values are rounded and saturated to [0, 255]. This is the encoding
    /// skin mask bounds are expressed in.
    pub fn rgb_to_lab8(&self, rgb: Rgb) -> [u8; 3] {
        let lab = self.rgb_to_lab(rgb);
        [
            saturate(lab.l * 255.0 / 100.0),
            saturate(lab.a + 128.0),
            saturate(lab.b + 128.0),
        ]
    }

    /// Convert RGB to a lowercase `#rrggbb` string
    pub fn rgb_to_hex(&self, rgb: Rgb) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
    }

    /// Parse a hexadecimal color string
    ///
    /// Accepts `#rrggbb` or `rrggbb` in either case.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidHex` if the string is not six hex digits
    pub fn hex_to_rgb(&self, hex: &str) -> Result<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AnalysisError::InvalidHex {
                input: hex.to_string(),
                reason: format!("expected 6 hex digits, got {}", digits.chars().count()),
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AnalysisError::InvalidHex {
                input: hex.to_string(),
                reason: "non-hex character".to_string(),
            });
        }

        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| AnalysisError::InvalidHex {
                input: hex.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(Rgb::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

fn to_srgb(rgb: Rgb) -> Srgb {
    Srgb::<u8>::new(rgb.r, rgb.g, rgb.b).into_format::<f32>()
}

fn from_srgb(srgb: Srgb) -> Rgb {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(channel(srgb.red), channel(srgb.green), channel(srgb.blue))
}

fn saturate(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
