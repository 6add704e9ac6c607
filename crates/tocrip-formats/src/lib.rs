//! Decoder for a fixed-layout disc table of contents
//!
#![allow(clippy::cast_possible_truncation)] // Record counts and indices are u32 on disc
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::use_self)] // Type clarity
//! A disc image carries a binary table of contents (ToC) at a known sector.
//! It holds five fixed-count tables describing where each asset lives:
//! region records (start sector plus length) for data archives and videos, and
//! location records (start sector only) for audio assets whose extent is read
//! from an embedded header.
//!
//! # Components
//!
//! - [`ByteReader`]: little-endian integer reads over any `Read + Seek`
//! - [`toc::Toc`]: decodes the header and tables, serializes to JSON via serde
//! - [`asset::AssetHeader`]: 0x30-byte audio header with payload length and name
//!
//! # Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use tocrip_formats::{ByteReader, Toc, TocLayout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = ByteReader::new(File::open("disc.iso")?);
//! let toc = Toc::read(&mut reader, &TocLayout::default())?;
//! println!("version {} with {} wads", toc.header.version, toc.wads.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod asset;
pub mod error;
pub mod reader;
pub mod toc;

pub use asset::{ASSET_HEADER_SIZE, AssetHeader};
pub use error::{Result, TocError};
pub use reader::{ByteReader, FixedSize, sector_offset};
pub use toc::{
    ByteRange, Category, LengthUnit, LocationRecord, RecordKind, RegionRecord, TableCounts,
    TableRef, Toc, TocHeader, TocLayout,
};
