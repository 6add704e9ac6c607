//! Error types for ToC and asset header decoding

use thiserror::Error;

/// Errors that can occur while reading the table of contents or asset headers
#[derive(Debug, Error)]
pub enum TocError {
    /// The source ended before the requested number of bytes could be read
    #[error("Unexpected end of source at offset {offset}: wanted {expected} bytes, got {actual}")]
    UnexpectedEof {
        /// Absolute offset where the read started
        offset: u64,
        /// Number of bytes requested
        expected: u64,
        /// Number of bytes actually available
        actual: u64,
    },

    /// Asset name bytes are not plain ASCII
    #[error("Asset header at offset {offset} has a non-ASCII name: {bytes:02x?}")]
    InvalidAssetName {
        /// Absolute offset of the asset header
        offset: u64,
        /// The raw name field
        bytes: Vec<u8>,
    },

    /// Sector number times block size does not fit in a 64-bit offset
    #[error("Sector {sector} with block size {block_size} overflows a 64-bit offset")]
    OffsetOverflow {
        /// Sector number
        sector: u64,
        /// Block size in bytes
        block_size: u64,
    },

    /// Binary read/write error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error on the underlying source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TocError {
    /// Whether this error came from the byte source rather than from decoding
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::UnexpectedEof { .. })
    }
}

impl From<binrw::Error> for TocError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            // Derived readers wrap field failures with context frames
            binrw::Error::Backtrace(bt) => Self::from(*bt.error),
            other => Self::BinRead(other.to_string()),
        }
    }
}

/// Result type alias for ToC operations
pub type Result<T> = std::result::Result<T, TocError>;

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TocError::UnexpectedEof {
            offset: 3_072_000,
            expected: 4,
            actual: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("3072000"));
        assert!(msg.contains("wanted 4"));

        let err = TocError::InvalidAssetName {
            offset: 0x800,
            bytes: vec![0x46, 0xff],
        };
        assert!(err.to_string().contains("ff"));

        let err = TocError::OffsetOverflow {
            sector: u64::MAX,
            block_size: 2048,
        };
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn test_binrw_io_maps_to_io() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: TocError = binrw::Error::Io(eof).into();
        assert!(err.is_io());
        assert!(matches!(err, TocError::Io(_)));
    }

    #[test]
    fn test_decode_errors_are_not_io() {
        let err = TocError::InvalidAssetName {
            offset: 0,
            bytes: vec![0x80],
        };
        assert!(!err.is_io());
    }
}
