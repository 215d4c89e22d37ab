//! Configuration loading and discovery for `scale3x.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::Scale3xConfig;
use crate::codec::OutputFormat;
use crate::upscale::FallbackFilter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "scale3x.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse scale3x.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output format
    pub format: Option<OutputFormat>,
    /// Override pre-scale filter
    pub filter: Option<FallbackFilter>,
    /// Enable or disable the small-image pre-scale
    pub fallback: Option<bool>,
    /// Enable or disable the parallel fill
    pub parallel: Option<bool>,
    /// Override output suffix
    pub suffix: Option<String>,
    /// Override log level
    pub log_level: Option<String>,
}

/// Find scale3x.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for scale3x.toml
/// 2. Check XDG_CONFIG_HOME/scale3x/scale3x.toml (or ~/.config/scale3x/scale3x.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find scale3x.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("scale3x").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find scale3x.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a scale3x.toml file.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses [`find_config`], falling back to defaults when nothing is found.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/scale3x.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Scale3xConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(Scale3xConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<Scale3xConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Scale3xConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged result
/// is validated again since overrides can carry invalid values too.
pub fn merge_cli_overrides(
    config: &mut Scale3xConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(format) = overrides.format {
        config.output.format = Some(format);
    }

    if let Some(filter) = overrides.filter {
        config.upscale.filter = filter;
    }

    if let Some(fallback) = overrides.fallback {
        config.upscale.fallback = fallback;
    }

    if let Some(parallel) = overrides.parallel {
        config.upscale.parallel = parallel;
    }

    if let Some(ref suffix) = overrides.suffix {
        config.output.suffix = suffix.clone();
    }

    if let Some(ref level) = overrides.log_level {
        config.log.level = level.clone();
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}
