//! Undertone, value and chroma labelling from HSV thresholds
//!
//! Every comparison is strict, so a value sitting exactly on a threshold
//! falls to the lower branch: hue 30 is cool, value 0.75 is medium,
//! chroma 0.40 is muted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    color::{ColorSample, Hsv},
    constants::classification::{
        BRIGHT_CHROMA, COOL_HUE_MAX, DEEP_VALUE, LIGHT_VALUE, WARM_HUE_ABOVE, WARM_HUE_BELOW,
    },
    AnalysisError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    Light,
    Medium,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chroma {
    Bright,
    Muted,
}

impl Undertone {
    pub const ALL: [Undertone; 3] = [Undertone::Warm, Undertone::Cool, Undertone::Neutral];
}

impl Value {
    pub const ALL: [Value; 3] = [Value::Light, Value::Medium, Value::Deep];
}

impl Chroma {
    pub const ALL: [Chroma; 2] = [Chroma::Bright, Chroma::Muted];
}

/// Immutable (undertone, value, chroma) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassificationLabel {
    pub undertone: Undertone,
    pub value: Value,
    pub chroma: Chroma,
}

impl ClassificationLabel {
    pub const fn new(undertone: Undertone, value: Value, chroma: Chroma) -> Self {
        Self {
            undertone,
            value,
            chroma,
        }
    }

    /// All 18 combinations
    pub fn all() -> impl Iterator<Item = ClassificationLabel> {
        Undertone::ALL.into_iter().flat_map(|u| {
            Value::ALL
                .into_iter()
                .flat_map(move |v| Chroma::ALL.into_iter().map(move |c| Self::new(u, v, c)))
        })
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}/{:?}", self.undertone, self.value, self.chroma)
    }
}

/// Threshold set for colorimetric classification
///
/// Alternate rule sets are expressed as alternate values of this struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Hue strictly below this is warm
    pub warm_hue_below: f32,
    /// Hue strictly above this is warm
    pub warm_hue_above: f32,
    /// Hues in `[warm_hue_below, cool_hue_max]` are cool
    pub cool_hue_max: f32,
    /// Value strictly above this is light
    pub light_value: f32,
    /// Value strictly below this is deep
    pub deep_value: f32,
    /// Chroma strictly above this is bright
    pub bright_chroma: f32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            warm_hue_below: WARM_HUE_BELOW,
            warm_hue_above: WARM_HUE_ABOVE,
            cool_hue_max: COOL_HUE_MAX,
            light_value: LIGHT_VALUE,
            deep_value: DEEP_VALUE,
            bright_chroma: BRIGHT_CHROMA,
        }
    }
}

impl ClassificationThresholds {
    pub fn validate(&self) -> Result<()> {
        let hue_ok = 0.0 <= self.warm_hue_below
            && self.warm_hue_below <= self.cool_hue_max
            && self.cool_hue_max <= self.warm_hue_above
            && self.warm_hue_above <= 360.0;
        if !hue_ok {
            return Err(AnalysisError::invalid_parameter(
                "thresholds.hue",
                format!(
                    "{} <= {} <= {} must hold within [0, 360]",
                    self.warm_hue_below, self.cool_hue_max, self.warm_hue_above
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.deep_value)
            || !(0.0..=1.0).contains(&self.light_value)
            || self.deep_value > self.light_value
        {
            return Err(AnalysisError::invalid_parameter(
                "thresholds.value",
                format!("deep {} / light {}", self.deep_value, self.light_value),
            ));
        }
        if !(0.0..=1.0).contains(&self.bright_chroma) {
            return Err(AnalysisError::invalid_parameter(
                "thresholds.bright_chroma",
                self.bright_chroma,
            ));
        }
        Ok(())
    }
}

/// Pure mapping from a color to its classification label
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorimetricClassifier {
    thresholds: ClassificationThresholds,
}

impl ColorimetricClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    pub fn classify(&self, sample: &ColorSample) -> ClassificationLabel {
        self.classify_hsv(sample.hsv())
    }

    pub fn classify_hsv(&self, hsv: Hsv) -> ClassificationLabel {
        ClassificationLabel::new(
            self.undertone(hsv.hue),
            self.value(hsv.value),
            self.chroma(hsv.chroma),
        )
    }

    pub fn undertone(&self, hue: f32) -> Undertone {
        let t = &self.thresholds;
        if hue < t.warm_hue_below || hue > t.warm_hue_above {
            Undertone::Warm
        } else if hue <= t.cool_hue_max {
            Undertone::Cool
        } else {
            Undertone::Neutral
        }
    }

    pub fn value(&self, value: f32) -> Value {
        if value > self.thresholds.light_value {
            Value::Light
        } else if value < self.thresholds.deep_value {
            Value::Deep
        } else {
            Value::Medium
        }
    }

    pub fn chroma(&self, chroma: f32) -> Chroma {
        if chroma > self.thresholds.bright_chroma {
            Chroma::Bright
        } else {
            Chroma::Muted
        }
    }
}
