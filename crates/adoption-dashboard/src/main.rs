//! Adoption Dashboard - Main Entry Point

use adoption_analytics::{compute_views, Filters, LoaderOptions};
use adoption_common::init_logging;
use adoption_config::{Config, ConfigLoader};
use adoption_dashboard::{page, serve, Args, DatasetCache};
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    args.apply_overrides(&mut config);

    init_logging(&config.logging.to_logging_config())?;
    info!("Starting adoption dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!(data = %config.data.path, "Configuration loaded successfully");

    if args.check {
        return check(&config).await;
    }

    serve(&config).await
}

/// Load the dataset once and print the unfiltered insight
async fn check(config: &Config) -> Result<()> {
    let cache = DatasetCache::new(
        &config.data.path,
        LoaderOptions {
            delimiter: config.data.delimiter_byte(),
        },
    );

    let table = match cache.get().await {
        Ok(table) => table,
        Err(e) => {
            let message = page::load_error_message(&e);
            error!(error = %e, "Dataset check failed");
            anyhow::bail!(message);
        }
    };

    let views = compute_views(&table, &Filters::all());
    println!("{}", views.insight.to_markdown());
    Ok(())
}
