//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading estate
//! configurations from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EstateConfig, EstateMetadata, PolicyConfig, RateConfig};

/// Loads and provides access to estate configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the rollup policy and plucking rates.
///
/// # Directory Structure
///
/// ```text
/// config/tea_estate/
/// ├── estate.yaml         # Estate metadata
/// ├── policy.yaml         # Rollup policy and classification strictness
/// └── rates/
///     └── 2025-01-01.yaml # Plucking rate effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use tea_payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/tea_estate")?;
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let rate = loader.get_plucking_rate(date)?;
/// println!("{} pays {} per kg", loader.estate().name, rate);
/// # Ok::<(), tea_payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EstateConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or if the rates directory holds no rate files.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EstateMetadata>(&path.join("estate.yaml"))?;
        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        tracing::debug!(
            estate = %metadata.code,
            rate_files = rates.len(),
            "Loaded estate configuration"
        );

        Ok(Self {
            config: EstateConfig::new(metadata, policy, rates),
        })
    }

    /// Builds a loader from an already assembled configuration.
    pub fn from_config(config: EstateConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_config = Self::load_yaml::<RateConfig>(&path)?;
                if rate_config.plucking_rate_per_kg < Decimal::ZERO {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: "plucking_rate_per_kg must not be negative".to_string(),
                    });
                }
                rates.push(rate_config);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying estate configuration.
    pub fn config(&self) -> &EstateConfig {
        &self.config
    }

    /// Returns the estate metadata.
    pub fn estate(&self) -> &EstateMetadata {
        self.config.estate()
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        self.config.policy()
    }

    /// Gets the standard plucking rate in force on a given date.
    ///
    /// The most recent rate effective on or before the date applies.
    pub fn get_plucking_rate(&self, date: NaiveDate) -> EngineResult<Decimal> {
        self.config
            .rates()
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .map(|rc| rc.plucking_rate_per_kg)
            .ok_or(EngineError::RateNotFound { date })
    }
}
