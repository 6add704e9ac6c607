//! Table categories and their per-category record rules

use crate::error::Result;
use crate::reader::sector_offset;
use std::fmt;

/// Shape of the records stored in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Start sector plus length
    Region,
    /// Start sector only; the extent comes from an embedded asset header
    Location,
}

impl RecordKind {
    /// Encoded width of one record in bytes
    pub const fn record_size(self) -> u64 {
        match self {
            Self::Region => 8,
            Self::Location => 4,
        }
    }
}

/// Unit of a region record's length field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Length counts whole sectors
    Sectors,
    /// Length counts bytes
    Bytes,
}

impl LengthUnit {
    /// Length in bytes for a raw length field
    pub fn byte_len(self, length: u32, block_size: u64) -> Result<u64> {
        match self {
            Self::Sectors => sector_offset(u64::from(length), block_size),
            Self::Bytes => Ok(u64::from(length)),
        }
    }
}

/// One of the five fixed ToC tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Level data archives
    Wads,
    /// Audio assets
    Vags,
    /// Secondary data archives
    Wads2,
    /// Bink video files
    Video,
    /// Secondary audio assets
    Vags2,
}

impl Category {
    /// All categories in on-disc table order
    pub const ALL: [Self; 5] = [Self::Wads, Self::Vags, Self::Wads2, Self::Video, Self::Vags2];

    /// Table name, also used as the output directory name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wads => "wads",
            Self::Vags => "vags",
            Self::Wads2 => "wads2",
            Self::Video => "video",
            Self::Vags2 => "vags2",
        }
    }

    /// Record shape stored in this table
    pub const fn record_kind(self) -> RecordKind {
        match self {
            Self::Wads | Self::Wads2 | Self::Video => RecordKind::Region,
            Self::Vags | Self::Vags2 => RecordKind::Location,
        }
    }

    /// Unit of the length describing a record's extent
    ///
    /// The video table stores byte counts while both wad tables store sector
    /// counts. Both are the real on-disc layout. Location tables take their
    /// length from the asset header, which counts bytes.
    pub const fn length_unit(self) -> LengthUnit {
        match self {
            Self::Wads | Self::Wads2 => LengthUnit::Sectors,
            Self::Video | Self::Vags | Self::Vags2 => LengthUnit::Bytes,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
