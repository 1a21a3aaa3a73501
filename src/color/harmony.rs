//! Complementary and analogous color derivation
//!
//! Hue rotation works on the 0-360 degree scale throughout.

use serde::{Deserialize, Serialize};

use crate::{
    color::{ColorConverter, Hsv, Rgb},
    constants::harmony::ANALOGOUS_STEP_DEG,
};

/// Harmony suggestions for one base color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonySet {
    pub base: Rgb,
    pub complementary: Rgb,
    /// `[hue + step, hue - step]`
    pub analogous: [Rgb; 2],
}

/// Deterministic hue-rotation harmony generator
#[derive(Debug, Clone, Copy)]
pub struct HarmonyGenerator {
    converter: ColorConverter,
    analogous_step: f32,
}

impl Default for HarmonyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HarmonyGenerator {
    pub fn new() -> Self {
        Self::with_step(ANALOGOUS_STEP_DEG)
    }

    /// Create a generator rotating analogous hues by `step_deg` degrees
    pub fn with_step(step_deg: f32) -> Self {
        Self {
            converter: ColorConverter::new(),
            analogous_step: step_deg,
        }
    }

    /// Per-channel inversion, `255 - c`
    pub fn complementary(&self, rgb: Rgb) -> Rgb {
        Rgb::new(255 - rgb.r, 255 - rgb.g, 255 - rgb.b)
    }

    /// Rotate hue by +step and -step, keeping value and chroma
    pub fn analogous(&self, rgb: Rgb) -> [Rgb; 2] {
        let hsv = self.converter.rgb_to_hsv(rgb);
        [
            self.rotate(hsv, self.analogous_step),
            self.rotate(hsv, -self.analogous_step),
        ]
    }

    pub fn harmony_set(&self, rgb: Rgb) -> HarmonySet {
        HarmonySet {
            base: rgb,
            complementary: self.complementary(rgb),
            analogous: self.analogous(rgb),
        }
    }

    fn rotate(&self, hsv: Hsv, degrees: f32) -> Rgb {
        let hue = (hsv.hue + degrees).rem_euclid(360.0);
        self.converter.hsv_to_rgb(Hsv { hue, ..hsv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complementary() {
        let generator = HarmonyGenerator::new();
        assert_eq!(generator.complementary(Rgb::new(255, 0, 0)), Rgb::new(0, 255, 255));
        assert_eq!(generator.complementary(Rgb::new(200, 150, 100)), Rgb::new(55, 105, 155));
    }

    #[test]
    fn test_complementary_is_involution() {
        let generator = HarmonyGenerator::new();
        for v in 0..=255u8 {
            let c = Rgb::new(v, v.wrapping_mul(7), 255 - v);
            assert_eq!(generator.complementary(generator.complementary(c)), c);
        }
    }

    #[test]
    fn test_analogous_of_red_wraps() {
        let generator = HarmonyGenerator::new();
        let [plus, minus] = generator.analogous(Rgb::new(255, 0, 0));

        // hue 20: r=255, g=255*20/60=85, b=0
        assert_eq!(plus, Rgb::new(255, 85, 0));
        // hue 340: r=255, g=0, b=85
        assert_eq!(minus, Rgb::new(255, 0, 85));
    }

    #[test]
    fn test_analogous_preserves_value_and_chroma() {
        let generator = HarmonyGenerator::new();
        let converter = ColorConverter::new();
        let base = converter.rgb_to_hsv(Rgb::new(40, 120, 200));

        for rotated in generator.analogous(Rgb::new(40, 120, 200)) {
            let hsv = converter.rgb_to_hsv(rotated);
            assert!((hsv.value - base.value).abs() < 0.01);
            assert!((hsv.chroma - base.chroma).abs() < 0.02);
        }
    }

    #[test]
    fn test_analogous_of_gray_is_gray() {
        let generator = HarmonyGenerator::new();
        let gray = Rgb::new(90, 90, 90);
        assert_eq!(generator.analogous(gray), [gray, gray]);
    }

    #[test]
    fn test_harmony_set() {
        let set = HarmonyGenerator::new().harmony_set(Rgb::new(10, 20, 30));
        assert_eq!(set.base, Rgb::new(10, 20, 30));
        assert_eq!(set.complementary, Rgb::new(245, 235, 225));
    }
}
