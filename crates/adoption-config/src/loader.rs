//! Configuration loading utilities

use crate::Config;
use adoption_common::{AdoptionError, Result as AdoptionResult};
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for AdoptionError {
    fn from(err: ConfigError) -> Self {
        AdoptionError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |key| env::var(key).ok())
    }

    /// Load configuration from a YAML file, resolving overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!("Parsed configuration file {}", path.as_ref().display());

        Self::apply_overrides(&mut config, lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from the usual locations, falling back to defaults
    pub fn load() -> AdoptionResult<Config> {
        let config = if let Ok(config_path) = env::var("ADOPTION_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            debug!("No configuration file found, using defaults");
            Self::defaults_with(|key| env::var(key).ok())?
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AdoptionResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Default configuration with overrides from `lookup` applied
    pub fn defaults_with<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        Self::apply_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides to configuration
    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Data
        if let Some(path) = lookup("ADOPTION_DATA_PATH") {
            config.data.path = path;
        }
        if let Some(delimiter) = lookup("ADOPTION_DATA_DELIMITER") {
            config.data.delimiter = delimiter;
        }

        // Server
        if let Some(address) = lookup("ADOPTION_BIND_ADDRESS") {
            config.server.bind_address = address;
        }

        // Dashboard
        if let Some(title) = lookup("ADOPTION_DASHBOARD_TITLE") {
            config.dashboard.title = title;
        }

        // Charts
        if let Some(width) = parse_var(&lookup, "CHART_WIDTH")? {
            config.charts.width = width;
        }
        if let Some(height) = parse_var(&lookup, "CHART_HEIGHT")? {
            config.charts.height = height;
        }
        if let Some(color) = lookup("CHART_BACKGROUND_COLOR") {
            config.charts.background_color = color;
        }
        if let Some(family) = lookup("CHART_FONT_FAMILY") {
            config.charts.font_family = family;
        }
        if let Some(size) = parse_var(&lookup, "CHART_FONT_SIZE")? {
            config.charts.font_size = size;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }
        if let Some(colored) = parse_var(&lookup, "LOG_COLORED")? {
            config.logging.colored = colored;
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const FULL_YAML: &str = "\
data:
  path: '/srv/adoption/device_adoption_data.csv'
  delimiter: ';'
server:
  bind_address: '0.0.0.0:9000'
dashboard:
  title: 'Adoption Review'
  subtitle: ''
  all_regions_label: 'All Regions'
  all_specialties_label: 'All Specialties'
charts:
  width: 1200
  height: 500
  background_color: '#FAFAFA'
  font_family: 'Helvetica'
  font_size: 12
  title_font_size: 20
  adoption_colors: ['#636EFA']
  region_colors: []
  specialty_colors: ['#7F3C8D', '#11A579']
logging:
  level: 'debug'
  format: 'compact'
  file: null
  colored: false
  include_location: true
";

    #[test]
    fn test_load_valid_yaml_config() {
        let temp_file = create_test_config_file(FULL_YAML);
        let config = ConfigLoader::load_config_with(temp_file.path(), vars(&[]))
            .expect("Failed to load config");

        assert_eq!(config.data.path, "/srv/adoption/device_adoption_data.csv");
        assert_eq!(config.data.delimiter_byte(), b';');
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.charts.width, 1200);
        assert_eq!(config.charts.specialty_colors.len(), 2);
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = create_test_config_file("data:\n  path: [unclosed");
        let result = ConfigLoader::load_config_with(temp_file.path(), vars(&[]));

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let temp_file = create_test_config_file("server:\n  bind_address: 'not-an-address'\n");
        let result = ConfigLoader::load_config_with(temp_file.path(), vars(&[]));

        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_overrides() {
        let temp_file = create_test_config_file(FULL_YAML);
        let lookup = vars(&[
            ("ADOPTION_DATA_PATH", "/tmp/override.csv"),
            ("ADOPTION_BIND_ADDRESS", "127.0.0.1:8080"),
            ("CHART_WIDTH", "1500"),
            ("LOG_LEVEL", "warn"),
            ("LOG_COLORED", "true"),
        ]);
        let config =
            ConfigLoader::load_config_with(temp_file.path(), lookup).expect("Failed to load config");

        assert_eq!(config.data.path, "/tmp/override.csv");
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.charts.width, 1500);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.colored);
    }

    #[test]
    fn test_env_parse_error() {
        let temp_file = create_test_config_file(FULL_YAML);
        let result =
            ConfigLoader::load_config_with(temp_file.path(), vars(&[("CHART_WIDTH", "wide")]));

        match result.unwrap_err() {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "CHART_WIDTH"),
            other => panic!("Expected EnvParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_override_is_validated() {
        let result = ConfigLoader::defaults_with(vars(&[("CHART_BACKGROUND_COLOR", "white")]));
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config_with("/nonexistent/path/config.yaml", vars(&[]));
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_defaults_with_no_overrides() {
        let config = ConfigLoader::defaults_with(vars(&[])).expect("Defaults must be valid");
        assert_eq!(config.data.path, "data/device_adoption_data.csv");
        assert_eq!(config.charts.height, 450);
    }

    #[test]
    fn test_config_error_converts_to_adoption_error() {
        let err = ConfigLoader::load_config_with("/nonexistent/config.yaml", vars(&[])).unwrap_err();
        let adoption: AdoptionError = err.into();
        assert!(adoption.to_string().starts_with("Configuration error"));
    }
}
