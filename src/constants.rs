//! Default tuning values for sampling, clustering and classification
//!
//! These are the baseline values behind [`crate::config::PipelineConfig::default`].
//! Every one of them can be overridden through configuration.

/// Skin chrominance mask in 8-bit LAB encoding
///
/// Channels are encoded as `L*·255/100`, `a*+128`, `b*+128`, so neutral
/// chroma sits at 128. The bounds are closed intervals.
pub mod skin_mask {
    /// Lower bound (L, a, b)
    pub const LAB_LOWER: [u8; 3] = [20, 130, 130];

    /// Upper bound (L, a, b)
    pub const LAB_UPPER: [u8; 3] = [255, 185, 185];

    /// Structuring element size for open/close smoothing
    pub const MORPH_KERNEL_SIZE: usize = 3;

    /// Minimum foreground pixels for a reliable skin analysis
    pub const MIN_SAMPLE_COUNT: usize = 300;
}

/// k-means clustering parameters
pub mod clustering {
    /// Clusters for skin palettes
    pub const DEFAULT_CLUSTERS: usize = 5;

    /// Clusters for whole-image (outfit) palettes
    pub const PALETTE_CLUSTERS: usize = 6;

    /// Smallest and largest K accepted from configuration
    pub const MIN_CLUSTERS: usize = 1;
    pub const MAX_CLUSTERS: usize = 10;

    /// Independent k-means++ restarts
    pub const RESTARTS: usize = 10;

    /// Lloyd iteration cap per restart
    pub const MAX_ITERATIONS: usize = 300;

    /// Convergence threshold on the largest centroid shift (RGB units)
    pub const EPSILON: f64 = 1e-4;

    pub const RANDOM_SEED: u64 = 42;

    /// Pre-filter cutoffs: max channel below this is near-black
    pub const NEAR_BLACK: u8 = 20;

    /// Pre-filter cutoffs: min channel above this is near-white
    pub const NEAR_WHITE: u8 = 235;
}

/// Colorimetric classification thresholds
pub mod classification {
    /// Hue strictly below this is warm
    pub const WARM_HUE_BELOW: f32 = 30.0;

    /// Hue strictly above this is warm
    ///
    /// Strict: hue exactly 330 is neutral, not warm (and never cool). Move the
    /// boundary through `ClassificationThresholds::warm_hue_above`.
    pub const WARM_HUE_ABOVE: f32 = 330.0;

    /// Upper (inclusive) edge of the cool hue band starting at `WARM_HUE_BELOW`
    pub const COOL_HUE_MAX: f32 = 210.0;

    /// HSV value strictly above this is light
    pub const LIGHT_VALUE: f32 = 0.75;

    /// HSV value strictly below this is deep
    pub const DEEP_VALUE: f32 = 0.35;

    /// HSV saturation strictly above this is bright
    pub const BRIGHT_CHROMA: f32 = 0.40;
}

/// Harmony generation
pub mod harmony {
    /// Analogous hue rotation in degrees (0-360 scale)
    pub const ANALOGOUS_STEP_DEG: f32 = 20.0;

    /// Number of top colors given harmony suggestions in palette reports
    pub const SUGGESTION_COUNT: usize = 2;
}

/// Image preparation
pub mod processing {
    /// Whole-image palettes are computed on a square resize of this edge
    pub const ANALYSIS_EDGE: u32 = 300;
}
