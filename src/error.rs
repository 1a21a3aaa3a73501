//! Error types for the season_palette library

use thiserror::Error;

/// Result type alias for season_palette operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color extraction and classification
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A color channel fell outside [0, 255]
    #[error("Invalid color: {channel} channel = {value} (expected 0-255)")]
    InvalidColor { channel: &'static str, value: i64 },

    /// Hex string could not be parsed as `#rrggbb`
    #[error("Invalid hex color '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    /// Fewer pixels than requested clusters, or below the configured minimum
    #[error("Insufficient samples: {found} pixels (minimum {required})")]
    InsufficientSamples { found: usize, required: usize },

    /// The foreground mask selected no pixels at all
    #[error("No foreground detected: {reason}")]
    NoForegroundDetected { reason: String },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if the caller can succeed by supplying different input.
    ///
    /// Analysis is deterministic, so none of these are worth retrying with the
    /// same input; recoverable ones are those a different region, mask or K
    /// can fix.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InsufficientSamples { .. } | AnalysisError::NoForegroundDetected { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            AnalysisError::NoForegroundDetected { .. } => {
                "No face or skin was detected. Please use a clear, well-framed portrait.".to_string()
            }
            AnalysisError::InsufficientSamples { found, required } => {
                format!(
                    "Cannot analyze: only {} usable pixels were found (minimum {}). \
                     The image may be too dark or too small.",
                    found, required
                )
            }
            AnalysisError::InvalidColor { .. } | AnalysisError::InvalidHex { .. } => {
                "The color value is not valid.".to_string()
            }
            _ => "Color analysis failed. Please try with a different image.".to_string(),
        }
    }
}
