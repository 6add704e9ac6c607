//! tocrip binary entry point.
//!
//! This is a thin wrapper around the tocrip-extract library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Runs the decode, dump and extraction
//!
//! For library usage, see the tocrip-extract crate documentation.

use anyhow::Result;
use tocrip_extract::{ExtractConfig, run};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ExtractConfig::from_args();

    tracing::debug!(
        "Configuration loaded: disc={}, toc_at={}, block_size={}, counts={:?}",
        config.disc.display(),
        config.toc_at,
        config.block_size,
        config.counts()
    );

    let summary = run(&config)?;

    if let Some(extract) = &summary.extract {
        for (category, stats) in &extract.stats {
            tracing::info!(
                "{}: {} written, {} empty, {} bytes",
                category,
                stats.written,
                stats.skipped,
                stats.bytes
            );
        }
    }

    Ok(())
}
