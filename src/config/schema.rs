//! Configuration schema types for `scale3x.toml`
//!
//! Defines the structure and validation rules for tool configuration.

use crate::codec::OutputFormat;
use crate::output::DEFAULT_SUFFIX;
use crate::upscale::{FallbackFilter, UpscaleOptions};
use serde::{Deserialize, Serialize};

/// Log levels accepted by `[log] level`.
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Upscale behavior section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpscaleConfig {
    /// Pre-scale images with fewer than nine pixels
    #[serde(default = "default_true")]
    pub fallback: bool,
    /// Filter used by the pre-scale
    #[serde(default)]
    pub filter: FallbackFilter,
    /// Fill the output on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self { fallback: true, filter: FallbackFilter::default(), parallel: true }
    }
}

impl UpscaleConfig {
    /// Options for [`upscale`](crate::upscale::upscale) built from this section.
    pub fn options(&self) -> UpscaleOptions {
        UpscaleOptions { fallback: self.fallback, filter: self.filter, parallel: self.parallel }
    }
}

/// Output naming and format section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Forced output format; derived from the output path when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    /// Suffix appended to the input stem for generated names
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: None, suffix: default_suffix() }
    }
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level for the stderr logger when no `-v` flag is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_true() -> bool {
    true
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Complete `scale3x.toml` contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scale3xConfig {
    /// Upscale behavior
    #[serde(default)]
    pub upscale: UpscaleConfig,
    /// Output naming and format
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

/// A validation error in the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.suffix")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scale3x.toml: '{}' {}", self.field, self.message)
    }
}

impl Scale3xConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        // An empty suffix would make default outputs overwrite their inputs
        if self.output.suffix.is_empty() {
            errors.push(ConfigValidationError {
                field: "output.suffix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.output.suffix.contains(['/', '\\']) {
            errors.push(ConfigValidationError {
                field: "output.suffix".to_string(),
                message: "must not contain path separators".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.log.level.to_ascii_lowercase().as_str()) {
            errors.push(ConfigValidationError {
                field: "log.level".to_string(),
                message: format!("must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        errors
    }
}
