//! Configuration structures for the season_palette analysis pipeline.
//!
//! This module defines all tunable parameters, organized into groups for
//! sampling, quantization and classification.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use season_palette::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), season_palette::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SamplingConfig`]: skin mask bounds, smoothing, minimum sample count
//! - [`QuantizationConfig`]: K, restarts, convergence, random seed
//! - [`ClassificationThresholds`]: undertone/value/chroma cutoffs
//! - `season_table`: rows of the season lookup table

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    classification::{ClassificationThresholds, SeasonRule, SeasonTable},
    constants::{
        clustering::{
            DEFAULT_CLUSTERS, EPSILON, MAX_CLUSTERS, MAX_ITERATIONS, MIN_CLUSTERS, NEAR_BLACK,
            NEAR_WHITE, PALETTE_CLUSTERS, RANDOM_SEED, RESTARTS,
        },
        harmony::SUGGESTION_COUNT,
        skin_mask::MIN_SAMPLE_COUNT,
    },
    detection::LabBounds,
    AnalysisError, Result,
};

/// Complete pipeline configuration.
///
/// Serializable to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Foreground sampling configuration
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Quantization configuration
    #[serde(default)]
    pub quantization: QuantizationConfig,

    /// Colorimetric thresholds
    #[serde(default)]
    pub thresholds: ClassificationThresholds,

    /// Season lookup rows; labels not listed resolve to Neutral/Transitional
    #[serde(default = "SeasonTable::standard_rules")]
    pub season_table: Vec<SeasonRule>,

    /// How many leading colors get harmony suggestions
    #[serde(default = "default_harmony_count")]
    pub harmony_count: usize,
}

/// Foreground sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Closed LAB interval (8-bit encoding) treated as skin
    pub lab_bounds: LabBounds,

    /// Apply 3x3 open-then-close smoothing to the mask
    pub smoothing: bool,

    /// Minimum foreground pixels required for analysis
    pub min_samples: usize,
}

/// k-means parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizationConfig {
    /// Number of clusters K
    pub clusters: usize,

    /// Independent k-means++ restarts
    pub restarts: usize,

    /// Lloyd iteration cap per restart
    pub max_iterations: usize,

    /// Convergence threshold on centroid movement
    pub epsilon: f64,

    /// Seed for restart RNG streams
    pub seed: u64,

    /// Exclude near-black and near-white pixels before clustering
    pub exclude_extremes: bool,

    /// Max channel below this counts as near-black
    pub near_black: u8,

    /// Min channel above this counts as near-white
    pub near_white: u8,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            lab_bounds: LabBounds::default(),
            smoothing: true,
            min_samples: MIN_SAMPLE_COUNT,
        }
    }
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            restarts: RESTARTS,
            max_iterations: MAX_ITERATIONS,
            epsilon: EPSILON,
            seed: RANDOM_SEED,
            exclude_extremes: false,
            near_black: NEAR_BLACK,
            near_white: NEAR_WHITE,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            quantization: QuantizationConfig::default(),
            thresholds: ClassificationThresholds::default(),
            season_table: SeasonTable::standard_rules(),
            harmony_count: SUGGESTION_COUNT,
        }
    }
}

fn default_harmony_count() -> usize {
    SUGGESTION_COUNT
}

impl PipelineConfig {
    /// Defaults for whole-image outfit palettes (six clusters)
    pub fn outfit() -> Self {
        Self::default().with_clusters(PALETTE_CLUSTERS)
    }

    /// Override the number of clusters
    pub fn with_clusters(mut self, k: usize) -> Self {
        self.quantization.clusters = k;
        self
    }

    /// Override the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.quantization.seed = seed;
        self
    }

    /// Check every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let q = &self.quantization;
        if !(MIN_CLUSTERS..=MAX_CLUSTERS).contains(&q.clusters) {
            return Err(AnalysisError::invalid_parameter(
                "quantization.clusters",
                format!("{} (expected {}-{})", q.clusters, MIN_CLUSTERS, MAX_CLUSTERS),
            ));
        }
        if q.restarts == 0 {
            return Err(AnalysisError::invalid_parameter("quantization.restarts", 0));
        }
        if q.max_iterations == 0 {
            return Err(AnalysisError::invalid_parameter("quantization.max_iterations", 0));
        }
        if !(q.epsilon.is_finite() && q.epsilon >= 0.0) {
            return Err(AnalysisError::invalid_parameter("quantization.epsilon", q.epsilon));
        }
        if q.near_black >= q.near_white {
            return Err(AnalysisError::invalid_parameter(
                "quantization.near_black",
                format!("{} >= near_white {}", q.near_black, q.near_white),
            ));
        }

        self.sampling.lab_bounds.validate()?;
        self.thresholds.validate()?;
        self.season_table()?;
        Ok(())
    }

    /// Build the season table described by `season_table`
    pub fn season_table(&self) -> Result<SeasonTable> {
        SeasonTable::from_rules(&self.season_table)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::config("Invalid configuration JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{Chroma, Season, Undertone, Value};

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quantization.seed, 42);
        assert_eq!(config.sampling.min_samples, 300);
        assert_eq!(config.season_table().unwrap(), SeasonTable::standard());
    }

    #[test]
    fn test_cluster_bounds() {
        assert!(PipelineConfig::default().with_clusters(0).validate().is_err());
        assert!(PipelineConfig::default().with_clusters(11).validate().is_err());
        assert!(PipelineConfig::default().with_clusters(10).validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig::default().with_clusters(3).with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = PipelineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "quantization": {
                "clusters": 4, "restarts": 2, "max_iterations": 50,
                "epsilon": 0.001, "seed": 9, "exclude_extremes": true,
                "near_black": 10, "near_white": 245
            }
        }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        assert_eq!(config.quantization.clusters, 4);
        assert_eq!(config.sampling, SamplingConfig::default());
        assert_eq!(config.season_table, SeasonTable::standard_rules());
    }

    #[test]
    fn test_custom_season_table_from_json() {
        let json = r#"{
            "season_table": [
                {"undertone": "Warm", "value": "Light", "chroma": "Bright", "season": "Light Spring"}
            ]
        }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        let table = config.season_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(&crate::classification::ClassificationLabel::new(
                Undertone::Warm,
                Value::Light,
                Chroma::Bright
            )),
            Some(Season::LightSpring)
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ not json"),
            Err(AnalysisError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("season_palette_cfg_{}.json", std::process::id()));
        let config = PipelineConfig::default().with_seed(99);
        config.to_json_file(&path).unwrap();
        let loaded = PipelineConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
