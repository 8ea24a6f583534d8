//! # Adoption Config
//!
//! Configuration management for the MedTech adoption dashboard: YAML files,
//! environment variable overrides and validation.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{ChartsConfig, Config, DashboardConfig, DataConfig, LoggingConfig, ServerConfig};
