//! Fixed-layout table of contents
//!
//! The ToC starts at a configured sector with an 8-byte [`TocHeader`],
//! followed immediately by five tables with fixed record counts:
//!
//! | Table   | Record            | Width |
//! |---------|-------------------|-------|
//! | `wads`  | [`RegionRecord`]  | 8     |
//! | `vags`  | [`LocationRecord`]| 4     |
//! | `wads2` | [`RegionRecord`]  | 8     |
//! | `video` | [`RegionRecord`]  | 8     |
//! | `vags2` | [`LocationRecord`]| 4     |
//!
//! There is no padding between tables or records and no magic number. The
//! declared `toc_size` is reported but never enforced, so a wrong start sector
//! decodes garbage rather than failing.
//!
//! # Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use tocrip_formats::ByteReader;
//! use tocrip_formats::toc::{RegionRecord, TableCounts, Toc, TocHeader, TocLayout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = TocLayout {
//!     toc_start: 1,
//!     block_size: 16,
//!     counts: TableCounts::empty().with(tocrip_formats::Category::Wads, 1),
//! };
//!
//! let toc = Toc {
//!     header: TocHeader::new(1, 8),
//!     wads: vec![RegionRecord::new(0, 10, 2)],
//!     ..Toc::default()
//! };
//!
//! let mut image = Cursor::new(vec![0u8; 16]);
//! image.set_position(16);
//! toc.write(&mut image)?;
//!
//! let parsed = Toc::read(&mut ByteReader::new(image), &layout)?;
//! assert_eq!(parsed, toc);
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod header;
pub mod layout;
pub mod record;

pub use category::{Category, LengthUnit, RecordKind};
pub use header::{HEADER_SIZE, TocHeader};
pub use layout::{DEFAULT_BLOCK_SIZE, DEFAULT_TOC_START, TableCounts, TocLayout};
pub use record::{ByteRange, LocationRecord, RegionRecord};

use crate::error::Result;
use crate::reader::ByteReader;
use binrw::BinWrite;
use serde::Serialize;
use std::io::{Read, Seek, Write};
use tracing::{debug, info};

/// Borrowed view of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRef<'a> {
    /// A table of region records
    Regions(&'a [RegionRecord]),
    /// A table of location records
    Locations(&'a [LocationRecord]),
}

impl TableRef<'_> {
    /// Number of records in the table
    pub fn len(&self) -> usize {
        match self {
            Self::Regions(r) => r.len(),
            Self::Locations(l) => l.len(),
        }
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records that are not sentinels
    pub fn present(&self) -> usize {
        match self {
            Self::Regions(r) => r.iter().filter(|rec| rec.is_present()).count(),
            Self::Locations(l) => l.iter().filter(|rec| rec.is_present()).count(),
        }
    }
}

/// Decoded ToC: header fields plus all five tables
///
/// Serializes to `{version, toc_size, wads, wads2, video, vags, vags2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Toc {
    /// Version and declared size
    #[serde(flatten)]
    pub header: TocHeader,
    /// Level data archives
    pub wads: Vec<RegionRecord>,
    /// Secondary data archives
    pub wads2: Vec<RegionRecord>,
    /// Bink videos, length in bytes
    pub video: Vec<RegionRecord>,
    /// Audio asset locations
    pub vags: Vec<LocationRecord>,
    /// Secondary audio asset locations
    pub vags2: Vec<LocationRecord>,
}

impl Toc {
    /// Decode the header and all tables in one sequential pass
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>, layout: &TocLayout) -> Result<Self> {
        let offset = layout.toc_offset()?;
        reader.seek(offset)?;
        debug!("Reading ToC at sector {} (offset {})", layout.toc_start, offset);

        let version = reader.read_u32_le(None)?;
        let toc_size = reader.read_u32_le(None)?;
        info!("Found ToC, version {} with size {}", version, toc_size);

        let counts = &layout.counts;
        let wads = read_regions(reader, counts.wads)?;
        let vags = read_locations(reader, counts.vags)?;
        let wads2 = read_regions(reader, counts.wads2)?;
        let video = read_regions(reader, counts.video)?;
        let vags2 = read_locations(reader, counts.vags2)?;

        let toc = Self {
            header: TocHeader::new(version, toc_size),
            wads,
            wads2,
            video,
            vags,
            vags2,
        };

        for category in Category::ALL {
            let table = toc.table(category);
            debug!(
                "Table {}: {} records, {} present",
                category,
                table.len(),
                table.present()
            );
        }

        Ok(toc)
    }

    /// Serialize the header and tables in on-disc order at the writer's position
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.header.write(writer)?;
        for record in &self.wads {
            record.write(writer)?;
        }
        for record in &self.vags {
            record.write(writer)?;
        }
        for record in &self.wads2 {
            record.write(writer)?;
        }
        for record in &self.video {
            record.write(writer)?;
        }
        for record in &self.vags2 {
            record.write(writer)?;
        }
        Ok(())
    }

    /// Serialize into a standalone buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Borrow one table
    pub fn table(&self, category: Category) -> TableRef<'_> {
        match category {
            Category::Wads => TableRef::Regions(&self.wads),
            Category::Vags => TableRef::Locations(&self.vags),
            Category::Wads2 => TableRef::Regions(&self.wads2),
            Category::Video => TableRef::Regions(&self.video),
            Category::Vags2 => TableRef::Locations(&self.vags2),
        }
    }

    /// Record counts matching this ToC, `leveldirs` left at zero
    pub fn counts(&self) -> TableCounts {
        Category::ALL
            .iter()
            .fold(TableCounts::empty(), |counts, &c| {
                counts.with(c, self.table(c).len() as u32)
            })
    }
}

fn read_regions<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    count: u32,
) -> Result<Vec<RegionRecord>> {
    (0..count)
        .map(|index| reader.read_fixed::<RegionRecord>((index,)))
        .collect()
}

fn read_locations<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    count: u32,
) -> Result<Vec<LocationRecord>> {
    (0..count)
        .map(|index| reader.read_fixed::<LocationRecord>((index,)))
        .collect()
}
