//! Extraction configuration.
//!
//! Configuration comes from CLI arguments with environment variable fallbacks
//! and falls back to the layout of the retail disc.
//!
//! # Configuration Sources
//!
//! - CLI arguments (`--outdir`, `--toc-at`, `--wads-count`, etc.)
//! - Environment variables (`TOCRIP_OUTDIR`, `TOCRIP_TOC_AT`, etc.)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use tocrip_extract::ExtractConfig;
//!
//! let config = ExtractConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("ToC expected at byte {}", config.toc_at * config.block_size);
//! ```

use crate::error::ConfigError;
use clap::Parser;
use std::path::{Path, PathBuf};
use tocrip_formats::toc::{DEFAULT_BLOCK_SIZE, DEFAULT_TOC_START};
use tocrip_formats::{TableCounts, TocLayout};

/// Extraction configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tocrip",
    about = "Extract assets from a disc image using its fixed table of contents",
    version
)]
pub struct ExtractConfig {
    /// Raw device or path to an ISO image
    pub disc: PathBuf,

    /// File to dump the decoded ToC to, as JSON
    #[arg(long, alias = "dumptoc", env = "TOCRIP_DUMP_TOC")]
    pub dump_toc: Option<PathBuf>,

    /// Directory to extract assets into
    #[arg(long, env = "TOCRIP_OUTDIR")]
    pub outdir: Option<PathBuf>,

    /// Sector holding the start of the ToC
    #[arg(long, env = "TOCRIP_TOC_AT", default_value_t = DEFAULT_TOC_START)]
    pub toc_at: u64,

    /// Size of a sector in bytes
    #[arg(
        long,
        alias = "blocksize",
        env = "TOCRIP_BLOCK_SIZE",
        default_value_t = DEFAULT_BLOCK_SIZE
    )]
    pub block_size: u64,

    /// Records in the wad table
    #[arg(long, env = "TOCRIP_WADS_COUNT", default_value_t = 479)]
    pub wads_count: u32,

    /// Records in the audio table
    #[arg(long, env = "TOCRIP_VAGS_COUNT", default_value_t = 240)]
    pub vags_count: u32,

    /// Records in the second wad table
    #[arg(long, env = "TOCRIP_WADS2_COUNT", default_value_t = 165)]
    pub wads2_count: u32,

    /// Records in the video table
    #[arg(long, env = "TOCRIP_VIDEO_COUNT", default_value_t = 90)]
    pub video_count: u32,

    /// Records in the second audio table
    #[arg(long, env = "TOCRIP_VAGS2_COUNT", default_value_t = 900)]
    pub vags2_count: u32,

    /// Level directory count (accepted, not decoded)
    #[arg(long, env = "TOCRIP_LEVELDIRS_COUNT", default_value_t = 38)]
    pub leveldirs_count: u32,
}

impl ExtractConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Configuration for `disc` with every other value at its default.
    pub fn new(disc: impl AsRef<Path>) -> Self {
        let counts = TableCounts::default();
        Self {
            disc: disc.as_ref().to_path_buf(),
            dump_toc: None,
            outdir: None,
            toc_at: DEFAULT_TOC_START,
            block_size: DEFAULT_BLOCK_SIZE,
            wads_count: counts.wads,
            vags_count: counts.vags,
            wads2_count: counts.wads2,
            video_count: counts.video,
            vags2_count: counts.vags2,
            leveldirs_count: counts.leveldirs,
        }
    }

    /// Per-table record counts.
    #[must_use]
    pub const fn counts(&self) -> TableCounts {
        TableCounts {
            wads: self.wads_count,
            vags: self.vags_count,
            wads2: self.wads2_count,
            video: self.video_count,
            vags2: self.vags2_count,
            leveldirs: self.leveldirs_count,
        }
    }

    /// Overwrite every per-table count.
    pub const fn set_counts(&mut self, counts: TableCounts) {
        self.wads_count = counts.wads;
        self.vags_count = counts.vags;
        self.wads2_count = counts.wads2;
        self.video_count = counts.video;
        self.vags2_count = counts.vags2;
        self.leveldirs_count = counts.leveldirs;
    }

    /// ToC position and shape for the decoder.
    #[must_use]
    pub const fn layout(&self) -> TocLayout {
        TocLayout {
            toc_start: self.toc_at,
            block_size: self.block_size,
            counts: self.counts(),
        }
    }

    /// Whether any output was requested.
    #[must_use]
    pub const fn has_output(&self) -> bool {
        self.dump_toc.is_some() || self.outdir.is_some()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Block size is zero
    /// - Disc source doesn't exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }

        if !self.disc.exists() {
            return Err(ConfigError::MissingSource(self.disc.clone()));
        }

        Ok(())
    }
}
