//! Error types shared by the dashboard crates

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used across the dashboard crates
pub type Result<T> = std::result::Result<T, AdoptionError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced by loading, aggregating, rendering or serving procedure data
#[derive(Error, Debug)]
pub enum AdoptionError {
    /// Settings could not be loaded or applied
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Filesystem failure outside the dataset loader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The procedure dataset does not exist at the configured location
    #[error("Data file not found at {}", path.display())]
    DataNotFound { path: PathBuf },

    /// Any other failure while reading or parsing the procedure dataset
    #[error("Data load error: {message}")]
    DataLoad {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Views could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A chart had nothing to draw or the SVG backend failed
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl AdoptionError {
    /// Configuration error wrapping its cause
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Missing dataset at `path`
    pub fn data_not_found(path: impl AsRef<Path>) -> Self {
        Self::DataNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Dataset present but unreadable
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad {
            message: msg.into(),
            source: None,
        }
    }

    /// Data load error keeping the underlying parser or I/O failure as its source
    pub fn data_load_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataLoad {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Chart that could not be drawn
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Whether this error means the dataset file is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DataNotFound { .. })
    }

    /// Whether this error came from loading the dataset
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::DataNotFound { .. } | Self::DataLoad { .. })
    }
}

#[cfg(feature = "plotters")]
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for AdoptionError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::Graph {
            message: "SVG drawing failed".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AdoptionError::graph("no bars").to_string(),
            "Graph error: no bars"
        );
        assert_eq!(
            AdoptionError::data_load("bad revenue").to_string(),
            "Data load error: bad revenue"
        );

        let parse = "x".parse::<u32>().unwrap_err();
        let config = AdoptionError::config_with_source("Invalid log filter", parse);
        assert_eq!(config.to_string(), "Configuration error: Invalid log filter");
        assert!(config.source().is_some());
    }

    #[test]
    fn test_data_not_found_display() {
        let error = AdoptionError::data_not_found("/tmp/missing.csv");
        assert_eq!(error.to_string(), "Data file not found at /tmp/missing.csv");
        assert!(error.is_not_found());
        assert!(error.is_data_error());
    }

    #[test]
    fn test_data_load_is_data_error_but_not_missing() {
        let error = AdoptionError::data_load("bad revenue on line 4");
        assert!(!error.is_not_found());
        assert!(error.is_data_error());
        assert!(!AdoptionError::graph("x").is_data_error());
    }

    #[test]
    fn test_data_load_keeps_source() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let wrapped = AdoptionError::data_load_with_source("Failed to read dataset", denied);

        assert!(wrapped.to_string().contains("Failed to read dataset"));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_conversions() {
        let io_error: AdoptionError = io::Error::new(io::ErrorKind::Other, "disk").into();
        assert!(io_error.to_string().starts_with("I/O error"));

        let json = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let error: AdoptionError = json.into();
        assert!(error.to_string().starts_with("Serialization error"));
    }
}
