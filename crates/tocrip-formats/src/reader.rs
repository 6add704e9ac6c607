//! Little-endian integer reader over a seekable byte source
//!
//! Every read reports short sources as [`TocError::UnexpectedEof`] with the
//! absolute offset the read started at, so a truncated image points straight
//! at the record that ran off the end.

use crate::error::{Result, TocError};
use binrw::{BinRead, BinReaderExt};
use std::io::{Read, Seek, SeekFrom, Write};

/// Values with a fixed on-disk width
pub trait FixedSize {
    /// Encoded width in bytes
    const ENCODED_SIZE: u64;
}

/// Convert a sector number into an absolute byte offset
pub fn sector_offset(sector: u64, block_size: u64) -> Result<u64> {
    sector
        .checked_mul(block_size)
        .ok_or(TocError::OffsetOverflow { sector, block_size })
}

/// Random-access reader used by the ToC and asset header decoders
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read + Seek> ByteReader<R> {
    /// Wrap a seekable source
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Current absolute position
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Absolute seek from the start of the source
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        Ok(self.inner.seek(SeekFrom::Start(offset))?)
    }

    /// Seek to the first byte of `sector`
    pub fn seek_sector(&mut self, sector: u64, block_size: u64) -> Result<u64> {
        let offset = sector_offset(sector, block_size)?;
        self.seek(offset)
    }

    /// Read a little-endian `u32`, seeking to `at` first when given
    pub fn read_u32_le(&mut self, at: Option<u64>) -> Result<u32> {
        if let Some(offset) = at {
            self.seek(offset)?;
        }
        let offset = self.position()?;
        match self.inner.read_le::<u32>() {
            Ok(value) => Ok(value),
            Err(e) => Err(self.short_read(e.into(), offset, 4)),
        }
    }

    /// Read a big-endian `u32` at the current position
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let offset = self.position()?;
        match self.inner.read_be::<u32>() {
            Ok(value) => Ok(value),
            Err(e) => Err(self.short_read(e.into(), offset, 4)),
        }
    }

    /// Read one fixed-width record, little-endian unless the type says otherwise
    pub fn read_fixed<T>(&mut self, args: T::Args<'_>) -> Result<T>
    where
        T: BinRead + FixedSize,
    {
        let offset = self.position()?;
        match T::read_le_args(&mut self.inner, args) {
            Ok(value) => Ok(value),
            Err(e) => Err(self.short_read(e.into(), offset, T::ENCODED_SIZE)),
        }
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.position()?;
        let mut buf = [0u8; N];
        let mut filled = 0;
        while filled < N {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        if filled < N {
            return Err(TocError::UnexpectedEof {
                offset,
                expected: N as u64,
                actual: filled as u64,
            });
        }
        Ok(buf)
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let offset = self.position()?;
        let mut buf = Vec::with_capacity(n);
        (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        if buf.len() < n {
            return Err(TocError::UnexpectedEof {
                offset,
                expected: n as u64,
                actual: buf.len() as u64,
            });
        }
        Ok(buf)
    }

    /// Stream exactly `len` bytes from the current position into `writer`
    pub fn copy_exact<W: Write>(&mut self, len: u64, writer: &mut W) -> Result<u64> {
        let offset = self.position()?;
        let copied = std::io::copy(&mut (&mut self.inner).take(len), writer)?;
        if copied < len {
            return Err(TocError::UnexpectedEof {
                offset,
                expected: len,
                actual: copied,
            });
        }
        Ok(copied)
    }

    // binrw surfaces a short read as io::ErrorKind::UnexpectedEof
    fn short_read(&mut self, err: TocError, offset: u64, expected: u64) -> TocError {
        match err {
            TocError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                let actual = match self.inner.seek(SeekFrom::End(0)) {
                    Ok(end) => end.saturating_sub(offset).min(expected),
                    Err(e) => return e.into(),
                };
                TocError::UnexpectedEof {
                    offset,
                    expected,
                    actual,
                }
            }
            other => other,
        }
    }
}
