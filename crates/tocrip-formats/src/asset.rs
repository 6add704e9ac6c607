//! Audio asset header
//!
//! Every location record points at a 0x30-byte header that precedes the audio
//! payload. Only two fields matter for extraction:
//!
//! - `0x0C..0x10`: payload length in bytes, big-endian
//! - `0x20..0x30`: ASCII name, padded with NULs or ASCII whitespace
//!
//! The header itself is copied verbatim into the extracted file, so the raw
//! bytes are kept alongside the decoded fields.

use crate::error::{Result, TocError};
use crate::reader::ByteReader;
use std::io::{Read, Seek};

/// Size of an asset header in bytes
pub const ASSET_HEADER_SIZE: usize = 0x30;

/// Offset of the big-endian payload length
pub const PAYLOAD_LENGTH_OFFSET: usize = 0x0C;

/// Offset of the name field
pub const NAME_OFFSET: usize = 0x20;

/// Decoded asset header plus its raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHeader {
    /// Header bytes exactly as stored
    pub raw: [u8; ASSET_HEADER_SIZE],
    /// Number of payload bytes following the header
    pub payload_length: u32,
    /// Trimmed asset name
    pub name: String,
}

impl AssetHeader {
    /// Read a header at the reader's current position
    ///
    /// The caller seeks to the asset's start sector first; this never seeks.
    pub fn read<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Self> {
        let offset = reader.position()?;
        let raw = reader.read_array::<ASSET_HEADER_SIZE>()?;
        Self::from_raw(raw, offset)
    }

    /// Decode a header from raw bytes; `offset` is only used in errors
    pub fn from_raw(raw: [u8; ASSET_HEADER_SIZE], offset: u64) -> Result<Self> {
        let mut length = [0u8; 4];
        length.copy_from_slice(&raw[PAYLOAD_LENGTH_OFFSET..PAYLOAD_LENGTH_OFFSET + 4]);
        let payload_length = u32::from_be_bytes(length);

        let name_bytes = &raw[NAME_OFFSET..ASSET_HEADER_SIZE];
        if !name_bytes.is_ascii() {
            return Err(TocError::InvalidAssetName {
                offset,
                bytes: name_bytes.to_vec(),
            });
        }
        let name: String = name_bytes.iter().copied().map(char::from).collect();
        let name = name.trim_matches(is_name_padding).trim_matches('\0').to_string();

        Ok(Self {
            raw,
            payload_length,
            name,
        })
    }

    /// Build a header carrying `name` and `payload_length`, other bytes zero
    ///
    /// Names longer than 16 bytes are cut to fit.
    pub fn build(name: &str, payload_length: u32) -> [u8; ASSET_HEADER_SIZE] {
        let mut raw = [0u8; ASSET_HEADER_SIZE];
        raw[PAYLOAD_LENGTH_OFFSET..PAYLOAD_LENGTH_OFFSET + 4]
            .copy_from_slice(&payload_length.to_be_bytes());
        let len = name.len().min(ASSET_HEADER_SIZE - NAME_OFFSET);
        raw[NAME_OFFSET..NAME_OFFSET + len].copy_from_slice(&name.as_bytes()[..len]);
        raw
    }

    /// Header plus payload size in bytes
    pub fn total_len(&self) -> u64 {
        ASSET_HEADER_SIZE as u64 + u64::from(self.payload_length)
    }
}

// ASCII whitespace including vertical tab and the 0x1C..0x1F separators
const fn is_name_padding(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r' | '\x1c'..='\x1f')
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_crafted_header() {
        let mut raw = [0u8; ASSET_HEADER_SIZE];
        raw[0..4].copy_from_slice(b"VAGp");
        raw[0x0C..0x10].copy_from_slice(&[0x00, 0x00, 0x01, 0x00]);
        raw[0x20..0x23].copy_from_slice(b"FOO");

        let header = AssetHeader::from_raw(raw, 0).expect("Should parse header");
        assert_eq!(header.payload_length, 256);
        assert_eq!(header.name, "FOO");
        assert_eq!(header.raw, raw);
        assert_eq!(header.total_len(), 0x30 + 256);
    }

    #[test]
    fn test_name_trims_spaces_then_nuls() {
        let mut raw = [0u8; ASSET_HEADER_SIZE];
        raw[0x20..0x30].copy_from_slice(b"  bgm_01       \0");
        let header = AssetHeader::from_raw(raw, 0).unwrap();
        assert_eq!(header.name, "bgm_01       ");

        raw[0x20..0x30].copy_from_slice(b"  bgm_01        ");
        let header = AssetHeader::from_raw(raw, 0).unwrap();
        assert_eq!(header.name, "bgm_01");

        raw[0x20..0x30].copy_from_slice(b"\0\0voice\0\0\0\0\0\0\0\0\0");
        let header = AssetHeader::from_raw(raw, 0).unwrap();
        assert_eq!(header.name, "voice");
    }

    #[test]
    fn test_name_trims_control_separators() {
        let mut raw = [0u8; ASSET_HEADER_SIZE];
        raw[0x20..0x30].copy_from_slice(b"\x1cSFX\x1d\x1e\x1f\x0b\t     \0\0");
        let header = AssetHeader::from_raw(raw, 0).unwrap();
        assert_eq!(header.name, "SFX\x1d\x1e\x1f\x0b\t     ");

        raw[0x20..0x30].copy_from_slice(b"\x1cSFX\x1d\x1e\x1f\x0b\t       ");
        let header = AssetHeader::from_raw(raw, 0).unwrap();
        assert_eq!(header.name, "SFX");
    }

    #[test]
    fn test_empty_name() {
        let header = AssetHeader::from_raw([0u8; ASSET_HEADER_SIZE], 0).unwrap();
        assert_eq!(header.name, "");
        assert_eq!(header.payload_length, 0);
    }

    #[test]
    fn test_non_ascii_name_rejected() {
        let mut raw = AssetHeader::build("FOO", 4);
        raw[0x24] = 0xE9;
        let err = AssetHeader::from_raw(raw, 0x5000).unwrap_err();
        assert!(!err.is_io());
        assert!(matches!(
            err,
            TocError::InvalidAssetName { offset: 0x5000, .. }
        ));
    }

    #[test]
    fn test_read_does_not_seek() {
        let mut data = vec![0xFFu8; 8];
        data.extend_from_slice(&AssetHeader::build("SFX", 3));
        data.extend_from_slice(&[1, 2, 3]);

        let mut reader = ByteReader::new(Cursor::new(data));
        reader.seek(8).unwrap();
        let header = AssetHeader::read(&mut reader).unwrap();
        assert_eq!(header.name, "SFX");
        assert_eq!(header.payload_length, 3);
        assert_eq!(reader.position().unwrap(), 8 + 0x30);
    }

    #[test]
    fn test_short_header_is_io_error() {
        let mut reader = ByteReader::new(Cursor::new(vec![0u8; 0x2F]));
        let err = AssetHeader::read(&mut reader).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_build_truncates_long_names() {
        let raw = AssetHeader::build("a_very_long_asset_name", 0);
        let header = AssetHeader::from_raw(raw, 0).unwrap();
        assert_eq!(header.name, "a_very_long_asse");
    }
}
