//! Mood associations for palette colors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgb;

/// Coarse mood a color conveys in styling guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Bold,
    Calm,
    Fresh,
    Neutral,
}

impl Mood {
    /// Rules are checked in order; the first match wins.
    pub fn of(rgb: Rgb) -> Self {
        if rgb.r > 200 && rgb.g < 100 {
            Mood::Bold
        } else if rgb.b > 150 {
            Mood::Calm
        } else if rgb.g > 150 {
            Mood::Fresh
        } else {
            Mood::Neutral
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mood::Bold => "Confidence, power, boldness",
            Mood::Calm => "Calm, trust, elegance",
            Mood::Fresh => "Freshness, growth, balance",
            Mood::Neutral => "Neutral, minimal, versatile",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
