//! Where the ToC lives and how many records each table holds

use crate::error::Result;
use crate::reader::sector_offset;
use crate::toc::category::Category;
use crate::toc::header::HEADER_SIZE;
use serde::Serialize;

/// Default ToC start sector
pub const DEFAULT_TOC_START: u64 = 1500;

/// Default sector size in bytes
pub const DEFAULT_BLOCK_SIZE: u64 = 2048;

/// Fixed record count of each table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    /// Region records in the wad table
    pub wads: u32,
    /// Location records in the audio table
    pub vags: u32,
    /// Region records in the second wad table
    pub wads2: u32,
    /// Region records in the video table
    pub video: u32,
    /// Location records in the second audio table
    pub vags2: u32,
    /// Level directory count. Carried as configuration only, no table is
    /// decoded for it.
    pub leveldirs: u32,
}

impl Default for TableCounts {
    fn default() -> Self {
        Self {
            wads: 479,
            vags: 240,
            wads2: 165,
            video: 90,
            vags2: 900,
            leveldirs: 38,
        }
    }
}

impl TableCounts {
    /// Every table empty
    pub const fn empty() -> Self {
        Self {
            wads: 0,
            vags: 0,
            wads2: 0,
            video: 0,
            vags2: 0,
            leveldirs: 0,
        }
    }

    /// Record count of a table
    pub const fn get(&self, category: Category) -> u32 {
        match category {
            Category::Wads => self.wads,
            Category::Vags => self.vags,
            Category::Wads2 => self.wads2,
            Category::Video => self.video,
            Category::Vags2 => self.vags2,
        }
    }

    /// Replace the record count of a table
    pub const fn with(mut self, category: Category, count: u32) -> Self {
        match category {
            Category::Wads => self.wads = count,
            Category::Vags => self.vags = count,
            Category::Wads2 => self.wads2 = count,
            Category::Video => self.video = count,
            Category::Vags2 => self.vags2 = count,
        }
        self
    }
}

/// Position and shape of the ToC inside a disc image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TocLayout {
    /// Sector holding the ToC header
    pub toc_start: u64,
    /// Sector size in bytes
    pub block_size: u64,
    /// Record count per table
    pub counts: TableCounts,
}

impl Default for TocLayout {
    fn default() -> Self {
        Self {
            toc_start: DEFAULT_TOC_START,
            block_size: DEFAULT_BLOCK_SIZE,
            counts: TableCounts::default(),
        }
    }
}

impl TocLayout {
    /// Absolute offset of the ToC header
    pub fn toc_offset(&self) -> Result<u64> {
        sector_offset(self.toc_start, self.block_size)
    }

    /// Bytes consumed by the header and all five tables
    pub fn encoded_size(&self) -> u64 {
        Category::ALL.iter().fold(HEADER_SIZE, |acc, &c| {
            acc + u64::from(self.counts.get(c)) * c.record_kind().record_size()
        })
    }
}
