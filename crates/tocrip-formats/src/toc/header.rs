//! ToC header
//!
//! Eight bytes at the ToC start sector: version then declared size, both
//! little-endian. Neither field is checked against anything.

use crate::reader::FixedSize;
use binrw::{BinRead, BinWrite};
use serde::Serialize;

/// Size of the ToC header in bytes
pub const HEADER_SIZE: u64 = 8;

/// ToC version and declared size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BinRead, BinWrite, Serialize)]
#[brw(little)]
pub struct TocHeader {
    /// Format version as stored on disc
    pub version: u32,
    /// Declared size of the ToC in bytes
    pub toc_size: u32,
}

impl FixedSize for TocHeader {
    const ENCODED_SIZE: u64 = HEADER_SIZE;
}

impl TocHeader {
    /// Create a header
    pub fn new(version: u32, toc_size: u32) -> Self {
        Self { version, toc_size }
    }
}
