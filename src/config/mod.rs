//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load estate configurations from YAML
//! files, including estate metadata, the rollup policy and the standard
//! plucking rates, plus the server settings read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use tea_payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/tea_estate").unwrap();
//! println!("Loaded estate: {}", config.estate().name);
//! ```

mod loader;
mod server;
mod types;

pub use loader::ConfigLoader;
pub use server::ServerSettings;
pub use types::{EstateConfig, EstateMetadata, PolicyConfig, RateConfig, RollupPolicy};
