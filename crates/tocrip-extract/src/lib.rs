//! Disc asset extraction.
//!
//! This crate drives the `tocrip-formats` decoder against a real disc image or
//! device:
//! - decodes the fixed table of contents once per run
//! - optionally dumps it as JSON
//! - optionally copies every listed asset into a directory tree
//!
//! # Architecture
//!
//! - `config`: CLI/environment configuration and validation
//! - `extract`: per-table extraction rules and file output
//! - `dump`: JSON export of the decoded ToC
//!
//! # Example
//!
//! ```no_run
//! use tocrip_extract::{ExtractConfig, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let mut config = ExtractConfig::new("/dev/sr0");
//!     config.outdir = Some("assets".into());
//!
//!     let summary = run(&config)?;
//!     println!("ToC version {}", summary.header.version);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod dump;
pub mod error;
pub mod extract;

pub use config::ExtractConfig;
pub use dump::{dump_toc, toc_to_json};
pub use error::{ConfigError, ExtractError, Result};
pub use extract::{CategoryStats, ExtractSummary, ExtractedFile, Extractor};

use std::fs::File;
use std::io::BufReader;
use tocrip_formats::{ByteReader, Toc, TocHeader};
use tracing::{info, warn};

/// Outcome of [`run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Header of the decoded ToC
    pub header: TocHeader,
    /// Extraction counters, present when an output directory was given
    pub extract: Option<ExtractSummary>,
}

/// Decode the ToC from the configured source and produce the requested outputs.
///
/// The source is opened for the duration of this call and closed on return,
/// whether or not an error occurred.
pub fn run(config: &ExtractConfig) -> Result<RunSummary> {
    config.validate()?;

    if !config.has_output() {
        warn!("Neither --dump-toc nor --outdir given; only decoding the ToC");
    }

    let file = File::open(&config.disc).map_err(|source| ExtractError::OpenSource {
        path: config.disc.clone(),
        source,
    })?;
    let mut reader = ByteReader::new(BufReader::new(file));

    let toc = Toc::read(&mut reader, &config.layout())?;

    if let Some(path) = &config.dump_toc {
        dump::dump_toc(&toc, path)?;
    }

    let extract = match &config.outdir {
        Some(outdir) => {
            info!("Extracting to {}", outdir.display());
            let summary = Extractor::new(&mut reader, config.block_size, outdir).extract_all(&toc)?;
            Some(summary)
        }
        None => None,
    };

    Ok(RunSummary {
        header: toc.header,
        extract,
    })
}
