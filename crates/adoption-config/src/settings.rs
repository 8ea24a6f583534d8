//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Procedure dataset location and format
    #[validate]
    pub data: DataConfig,

    /// HTTP server settings
    #[validate]
    pub server: ServerConfig,

    /// Page text and filter labels
    #[validate]
    pub dashboard: DashboardConfig,

    /// Chart rendering settings
    #[validate]
    pub charts: ChartsConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,
}

/// Procedure dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the delimited procedure file
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Data path must be a non-empty, valid file path"))]
    pub path: String,

    /// Single-character field delimiter
    #[validate(custom(function = "crate::validation::validate_delimiter", message = "Delimiter must be a single ASCII character"))]
    pub delimiter: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[validate(custom(function = "crate::validation::validate_bind_address", message = "Bind address must be host:port"))]
    pub bind_address: String,
}

/// Dashboard text configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    /// Line shown under the title
    pub subtitle: String,

    /// Drop-down label meaning "no region filter"
    #[validate(length(min = 1, message = "All-regions label cannot be empty"))]
    pub all_regions_label: String,

    /// Drop-down label meaning "no specialty filter"
    #[validate(length(min = 1, message = "All-specialties label cannot be empty"))]
    pub all_specialties_label: String,
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// Chart width in pixels
    #[validate(range(min = 200, max = 4000, message = "Width must be between 200 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 150, max = 4000, message = "Height must be between 150 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Font family for text rendering
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for axis labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,

    /// Font size for chart captions
    #[validate(range(min = 8, max = 96, message = "Title font size must be between 8 and 96"))]
    pub title_font_size: u32,

    /// Line colors for the adoption trend chart
    #[validate(custom(function = "crate::validation::validate_color_list", message = "Adoption colors must be hex colors"))]
    pub adoption_colors: Vec<String>,

    /// Bar colors for the region volume chart
    #[validate(custom(function = "crate::validation::validate_color_list", message = "Region colors must be hex colors"))]
    pub region_colors: Vec<String>,

    /// Bar colors for the specialty breakdown chart
    #[validate(custom(function = "crate::validation::validate_color_list", message = "Specialty colors must be hex colors"))]
    pub specialty_colors: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Line format (pretty, compact, json)
    #[validate(custom(function = "crate::validation::validate_log_format", message = "Log format must be one of: pretty, compact, json"))]
    pub format: String,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Log file must be a valid file path"))]
    pub file: Option<String>,

    /// Whether to use colored output (for console logging)
    pub colored: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "data/device_adoption_data.csv".to_string(),
            delimiter: ",".to_string(),
        }
    }
}

impl DataConfig {
    /// The delimiter as a byte; falls back to `,` for an unvalidated value
    pub fn delimiter_byte(&self) -> u8 {
        match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => b',',
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "MedTech Commercial Adoption Analysis".to_string(),
            subtitle: "Monthly adoption velocity, regional penetration and specialty segmentation."
                .to_string(),
            all_regions_label: "All Regions".to_string(),
            all_specialties_label: "All Specialties".to_string(),
        }
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| (*c).to_string()).collect()
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 450,
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 13,
            title_font_size: 18,
            adoption_colors: palette(&["#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A"]),
            region_colors: palette(&[
                "#4B2991", "#872CA2", "#C0369D", "#EA4F88", "#FA7876", "#F6A97A", "#EDD9A3",
            ]),
            specialty_colors: palette(&[
                "#7F3C8D", "#11A579", "#3969AC", "#F2B701", "#E73F74", "#80BA5A", "#E68310",
                "#008695", "#CF1C90", "#F97B72", "#A5AA99",
            ]),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
            colored: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Convert into the subscriber settings understood by `adoption_common::init_logging`
    pub fn to_logging_config(&self) -> adoption_common::LoggingConfig {
        let format = match self.format.as_str() {
            "json" => adoption_common::LogFormat::Json,
            "compact" => adoption_common::LogFormat::Compact,
            _ => adoption_common::LogFormat::Pretty,
        };
        adoption_common::LoggingConfig {
            level: self.level.clone(),
            format,
            file_path: self.file.clone(),
            include_location: self.include_location,
            ansi: self.colored,
            ..adoption_common::LoggingConfig::default()
        }
    }
}
