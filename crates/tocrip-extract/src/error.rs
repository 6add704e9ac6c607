//! Error types for the extraction tool.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use std::path::PathBuf;
use thiserror::Error;
use tocrip_formats::TocError;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Block size of zero would put every sector at offset 0
    #[error("Block size must be greater than zero")]
    ZeroBlockSize,

    /// Source image or device does not exist
    #[error("Disc source not found: {}", .0.display())]
    MissingSource(PathBuf),
}

/// Errors raised while decoding, dumping, or extracting.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to open the disc source
    #[error("Failed to open disc source {}: {source}", .path.display())]
    OpenSource {
        /// Path of the image or device
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output directory
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write an output file
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFile {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the JSON ToC dump
    #[error("Failed to write ToC dump to {}: {source}", .path.display())]
    DumpToc {
        /// Dump destination
        path: PathBuf,
        /// Underlying serialization or I/O error
        #[source]
        source: serde_json::Error,
    },

    /// ToC or asset header decoding failed
    #[error("Decode error: {0}")]
    Format(#[from] TocError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::ZeroBlockSize;
        assert_eq!(err.to_string(), "Block size must be greater than zero");

        let err = ConfigError::MissingSource(PathBuf::from("/dev/sr9"));
        assert_eq!(err.to_string(), "Disc source not found: /dev/sr9");
    }

    #[test]
    fn test_error_conversion() {
        let err: ExtractError = ConfigError::ZeroBlockSize.into();
        assert!(err.to_string().contains("Block size"));

        let toc_err = TocError::UnexpectedEof {
            offset: 8,
            expected: 4,
            actual: 0,
        };
        let err: ExtractError = toc_err.into();
        assert!(err.to_string().starts_with("Decode error"));
    }

    #[test]
    fn test_write_error_names_path() {
        let err = ExtractError::WriteFile {
            path: PathBuf::from("out/wads/wad_3.wad"),
            source: std::io::Error::other("disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("wad_3.wad"));
        assert!(msg.contains("disk full"));
    }
}
