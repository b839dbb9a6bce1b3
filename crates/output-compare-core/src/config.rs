//! Configuration loader for output comparison.

use crate::tolerance::AllClose;
use crate::truncate::DEFAULT_TRUNCATE_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("config file not found: {0}")]
    NotFound(String),
    #[error("truncate-length must be greater than 0")]
    ZeroTruncateLength,
    #[error("tolerance {name} must be a finite, non-negative number (got {value})")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Comparator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompareConfig {
    /// Character budget for values embedded in mismatch messages.
    #[serde(default = "default_truncate_length")]
    pub truncate_length: usize,
    /// Try JSON structural equality before comparing lines.
    #[serde(default = "default_structural")]
    pub structural: bool,
    /// Float tolerance for numeric lines; `null` requires exact decimals.
    #[serde(default = "default_tolerance")]
    pub tolerance: Option<AllClose>,
}

const fn default_truncate_length() -> usize {
    DEFAULT_TRUNCATE_LENGTH
}

const fn default_structural() -> bool {
    true
}

fn default_tolerance() -> Option<AllClose> {
    Some(AllClose::default())
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            truncate_length: default_truncate_length(),
            structural: default_structural(),
            tolerance: default_tolerance(),
        }
    }
}

/// Load comparator configuration from a YAML (or JSON) file.
///
/// With no path, returns the default configuration.
///
/// # Errors
/// Returns an error if:
/// - The path is given but does not exist or cannot be read
/// - The YAML is invalid or has unknown fields
/// - A value fails validation
pub fn load_config(path: Option<&Path>) -> Result<CompareConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            let content = std::fs::read_to_string(path)?;
            serde_yml::from_str(&content)?
        }
        None => CompareConfig::default(),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Validate the configuration.
///
/// # Errors
/// Returns an error for a zero `truncate-length` or a negative or
/// non-finite tolerance.
pub fn validate_config(config: &CompareConfig) -> Result<(), ConfigError> {
    if config.truncate_length == 0 {
        return Err(ConfigError::ZeroTruncateLength);
    }
    if let Some(tolerance) = config.tolerance {
        for (name, value) in [("rtol", tolerance.rtol), ("atol", tolerance.atol)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
    }
    Ok(())
}

/// CLI override options for configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub truncate_length: Option<usize>,
    pub structural: Option<bool>,
    pub rtol: Option<f64>,
    pub atol: Option<f64>,
    pub no_tolerance: bool,
}

/// Apply CLI overrides to a configuration.
///
/// Tolerance overrides re-enable tolerant matching even if the file disabled
/// it, unless `no_tolerance` is set.
#[must_use]
pub fn apply_overrides(mut config: CompareConfig, overrides: &ConfigOverrides) -> CompareConfig {
    if let Some(truncate_length) = overrides.truncate_length {
        config.truncate_length = truncate_length;
    }
    if let Some(structural) = overrides.structural {
        config.structural = structural;
    }
    if overrides.rtol.is_some() || overrides.atol.is_some() {
        let mut tolerance = config.tolerance.unwrap_or_default();
        if let Some(rtol) = overrides.rtol {
            tolerance.rtol = rtol;
        }
        if let Some(atol) = overrides.atol {
            tolerance.atol = atol;
        }
        config.tolerance = Some(tolerance);
    }
    if overrides.no_tolerance {
        config.tolerance = None;
    }
    config
}
