use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod config;
mod model;
mod pipeline;
mod table;

use config::Config;

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    info!(
        "Predicting {} → {} (rating scale {}, spread scale {})",
        config.input, config.output, config.rating_scale, config.spread_scale
    );

    let summary = pipeline::run(&config)
        .with_context(|| format!("prediction run for {} failed", config.input))?;

    if summary.rows_skipped > 0 {
        info!("Skipped {} row(s) with no home or away team", summary.rows_skipped);
    }
    info!(
        "Tiers used: {} rating, {} spread, {} neutral",
        summary.rating_rows, summary.spread_rows, summary.neutral_rows
    );
    info!("Wrote {} with {} rows.", config.output, summary.rows_written);

    Ok(())
}
