//! Region and location records
//!
//! Neither record stores its own index on disc. The decoder passes the running
//! table position in as a binrw import so the index always matches stream
//! order.

use crate::error::Result;
use crate::reader::{FixedSize, sector_offset};
use crate::toc::category::LengthUnit;
use binrw::{BinRead, BinWrite};
use serde::Serialize;

/// Absolute byte range inside the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte
    pub offset: u64,
    /// Number of bytes
    pub len: u64,
}

/// Start sector plus length, describing a byte range directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite, Serialize)]
#[brw(little)]
#[br(import(index: u32))]
pub struct RegionRecord {
    /// Position within the table, dumped as `num`
    #[br(calc = index)]
    #[bw(ignore)]
    #[serde(rename = "num")]
    pub index: u32,
    /// Start sector
    pub start: u32,
    /// Length, in the unit of the owning table
    pub length: u32,
}

impl FixedSize for RegionRecord {
    const ENCODED_SIZE: u64 = 8;
}

impl RegionRecord {
    /// Create a region record
    pub fn new(index: u32, start: u32, length: u32) -> Self {
        Self {
            index,
            start,
            length,
        }
    }

    /// Zero start or zero length marks an unused slot
    pub fn is_present(&self) -> bool {
        self.start != 0 && self.length != 0
    }

    /// Byte range covered by this record
    pub fn byte_range(&self, unit: LengthUnit, block_size: u64) -> Result<ByteRange> {
        Ok(ByteRange {
            offset: sector_offset(u64::from(self.start), block_size)?,
            len: unit.byte_len(self.length, block_size)?,
        })
    }
}

/// Start sector only
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite, Serialize)]
#[brw(little)]
#[br(import(index: u32))]
pub struct LocationRecord {
    /// Position within the table, dumped as `num`
    #[br(calc = index)]
    #[bw(ignore)]
    #[serde(rename = "num")]
    pub index: u32,
    /// Start sector of the embedded asset header
    pub start: u32,
}

impl FixedSize for LocationRecord {
    const ENCODED_SIZE: u64 = 4;
}

impl LocationRecord {
    /// Create a location record
    pub fn new(index: u32, start: u32) -> Self {
        Self { index, start }
    }

    /// Zero start marks an unused slot
    pub fn is_present(&self) -> bool {
        self.start != 0
    }

    /// Absolute offset of the asset header
    pub fn byte_offset(&self, block_size: u64) -> Result<u64> {
        sector_offset(u64::from(self.start), block_size)
    }
}
