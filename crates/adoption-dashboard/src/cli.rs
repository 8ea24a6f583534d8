//! Command line arguments

use adoption_config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Interactive market adoption dashboard for device procedure records
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "ADOPTION_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Procedure data file, overriding the configured path
    #[arg(short, long)]
    pub data: Option<String>,

    /// Listen address, overriding the configured one
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Log level, overriding the configured one
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Load the data, print the default insight as markdown and exit
    #[arg(long)]
    pub check: bool,
}

impl Args {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data.path.clone_from(data);
        }
        if let Some(bind) = &self.bind {
            config.server.bind_address.clone_from(bind);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
