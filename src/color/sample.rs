//! Integer RGB pixels and color samples with derived HSV attributes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{color::conversion::Hsv, AnalysisError, ColorConverter, Result};

/// 8-bit RGB triple
///
/// Ordering is lexical over (red, green, blue), which the quantizer uses to
/// break percentage ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from untrusted integer channels
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidColor` for the first channel outside
    /// [0, 255]. Values are never clamped.
    pub fn try_new(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn is_black(self) -> bool {
        self == Self::BLACK
    }

    pub fn max_channel(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    pub fn min_channel(self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// Squared Euclidean distance to a floating-point point in RGB space
    pub(crate) fn distance_sq(self, point: &[f64; 3]) -> f64 {
        let dr = self.r as f64 - point[0];
        let dg = self.g as f64 - point[1];
        let db = self.b as f64 - point[2];
        dr * dr + dg * dg + db * db
    }

    pub(crate) fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }
}

fn channel(name: &'static str, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| AnalysisError::InvalidColor {
        channel: name,
        value,
    })
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(px: image::Rgb<u8>) -> Self {
        Self::new(px[0], px[1], px[2])
    }
}

impl TryFrom<[i64; 3]> for Rgb {
    type Error = AnalysisError;

    fn try_from([r, g, b]: [i64; 3]) -> Result<Self> {
        Self::try_new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A color under analysis
///
/// Only the RGB source is stored. Hue, value and chroma are derived on each
/// call, so they can never drift from the underlying color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSample {
    rgb: Rgb,
}

impl ColorSample {
    pub fn new(rgb: Rgb) -> Self {
        Self { rgb }
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.rgb = rgb;
    }

    pub fn hsv(&self) -> Hsv {
        ColorConverter::new().rgb_to_hsv(self.rgb)
    }

    /// Hue in degrees, [0, 360)
    pub fn hue(&self) -> f32 {
        self.hsv().hue
    }

    /// HSV value, [0, 1]
    pub fn value(&self) -> f32 {
        self.hsv().value
    }

    /// HSV saturation, [0, 1]
    pub fn chroma(&self) -> f32 {
        self.hsv().chroma
    }

    pub fn hex(&self) -> String {
        ColorConverter::new().rgb_to_hex(self.rgb)
    }
}

impl From<Rgb> for ColorSample {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb)
    }
}
