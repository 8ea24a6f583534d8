//! Structured logging infrastructure for the dashboard

use crate::{AdoptionError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human friendly output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "adoption_analytics=trace")
    pub level: String,
    /// Line format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to include file/line information
    pub include_location: bool,
    /// Whether to colorize console output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_spans: false,
            include_targets: true,
            include_location: false,
            ansi: true,
        }
    }
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| AdoptionError::config_with_source("Invalid log filter", e))
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(&config.level)?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let file = match &config.file_path {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    let base = fmt::layer()
        .with_span_events(span_events)
        .with_target(config.include_targets)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    // File output never carries ANSI escapes
    let layer = match (config.format, file) {
        (LogFormat::Json, Some(file)) => base
            .json()
            .with_writer(Mutex::new(file))
            .with_filter(env_filter)
            .boxed(),
        (LogFormat::Json, None) => base.json().with_filter(env_filter).boxed(),
        (LogFormat::Pretty, Some(file)) => base
            .pretty()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(env_filter)
            .boxed(),
        (LogFormat::Pretty, None) => base
            .pretty()
            .with_ansi(config.ansi)
            .with_filter(env_filter)
            .boxed(),
        (LogFormat::Compact, Some(file)) => base
            .compact()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(env_filter)
            .boxed(),
        (LogFormat::Compact, None) => base
            .compact()
            .with_ansi(config.ansi)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| AdoptionError::config_with_source("Failed to install tracing subscriber", e))
}
