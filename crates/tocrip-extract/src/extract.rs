//! Asset extraction
//!
//! Walks the decoded ToC table by table and copies every non-sentinel record
//! out of the disc image into `outdir/<table>/`:
//!
//! | Table   | Skipped when             | Bytes copied                          | File name            |
//! |---------|--------------------------|---------------------------------------|----------------------|
//! | `wads`  | start or length is zero  | `length` sectors from `start`         | `wad_{i}.wad`        |
//! | `vags`  | start is zero            | 0x30 header plus its payload          | `{name}_{i}.vag`     |
//! | `wads2` | start or length is zero  | `length` sectors from `start`         | `wad2_{i}.wad`       |
//! | `video` | start or length is zero  | `length` bytes from `start`           | `video_{i}.bik`      |
//! | `vags2` | start is zero            | 0x30 header plus its payload          | `{name}_{i}.vag2`    |
//!
//! Records are independent. A failure stops the run and leaves files already
//! written in place. Each file is staged in its category directory and only
//! renamed to its final name once every byte has been copied.

use crate::error::{ExtractError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tocrip_formats::{
    AssetHeader, ByteReader, Category, LocationRecord, RegionRecord, TableRef, Toc,
};
use tracing::{debug, info};

/// Output file name for a record
///
/// `asset_name` is only used by the audio tables.
pub fn output_file_name(category: Category, index: u32, asset_name: &str) -> String {
    match category {
        Category::Wads => format!("wad_{index}.wad"),
        Category::Wads2 => format!("wad2_{index}.wad"),
        Category::Video => format!("video_{index}.bik"),
        Category::Vags => format!("{}_{index}.vag", sanitize_name(asset_name)),
        Category::Vags2 => format!("{}_{index}.vag2", sanitize_name(asset_name)),
    }
}

// Names come from the disc; keep them inside the category directory.
fn sanitize_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Create `path` and its parents, tolerating directories that already exist
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ExtractError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// One file written by the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Source table
    pub category: Category,
    /// Record index within the table
    pub index: u32,
    /// Output path
    pub path: PathBuf,
    /// Bytes written, including any asset header
    pub bytes: u64,
}

/// Per-table extraction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// Files written
    pub written: usize,
    /// Sentinel records skipped
    pub skipped: usize,
    /// Bytes written
    pub bytes: u64,
}

/// Outcome of an extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Counters per table
    pub stats: BTreeMap<Category, CategoryStats>,
    /// Every file written, in write order
    pub files: Vec<ExtractedFile>,
}

impl ExtractSummary {
    /// Counters for one table
    pub fn category(&self, category: Category) -> CategoryStats {
        self.stats.get(&category).copied().unwrap_or_default()
    }

    /// Total files written
    pub fn files_written(&self) -> usize {
        self.files.len()
    }

    /// Total bytes written
    pub fn bytes_written(&self) -> u64 {
        self.stats.values().map(|s| s.bytes).sum()
    }

    /// Total sentinel records skipped
    pub fn skipped(&self) -> usize {
        self.stats.values().map(|s| s.skipped).sum()
    }

    fn record_skip(&mut self, category: Category) {
        self.stats.entry(category).or_default().skipped += 1;
    }

    fn record_file(&mut self, file: ExtractedFile) {
        let stats = self.stats.entry(file.category).or_default();
        stats.written += 1;
        stats.bytes += file.bytes;
        self.files.push(file);
    }
}

/// Copies ToC records out of a disc image
///
/// Holds the single read cursor for the duration of the extraction.
pub struct Extractor<'a, R> {
    reader: &'a mut ByteReader<R>,
    block_size: u64,
    outdir: PathBuf,
}

impl<'a, R: Read + Seek> Extractor<'a, R> {
    /// Create an extractor writing below `outdir`
    pub fn new(reader: &'a mut ByteReader<R>, block_size: u64, outdir: impl AsRef<Path>) -> Self {
        Self {
            reader,
            block_size,
            outdir: outdir.as_ref().to_path_buf(),
        }
    }

    /// Output directory for a table
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.outdir.join(category.name())
    }

    /// Extract every table in on-disc order
    pub fn extract_all(&mut self, toc: &Toc) -> Result<ExtractSummary> {
        ensure_dir(&self.outdir)?;

        let mut summary = ExtractSummary::default();
        for category in Category::ALL {
            self.extract_category(toc, category, &mut summary)?;
        }

        info!(
            "Extracted {} files ({} bytes), skipped {} empty slots",
            summary.files_written(),
            summary.bytes_written(),
            summary.skipped()
        );
        Ok(summary)
    }

    /// Extract one table, creating its directory even when every slot is empty
    pub fn extract_category(
        &mut self,
        toc: &Toc,
        category: Category,
        summary: &mut ExtractSummary,
    ) -> Result<()> {
        let dir = self.category_dir(category);
        ensure_dir(&dir)?;
        summary.stats.entry(category).or_default();

        match toc.table(category) {
            TableRef::Regions(records) => {
                for record in records {
                    if !record.is_present() {
                        debug!("Skipping empty {} slot {}", category, record.index);
                        summary.record_skip(category);
                        continue;
                    }
                    let file = self.extract_region(category, record, &dir)?;
                    summary.record_file(file);
                }
            }
            TableRef::Locations(records) => {
                for record in records {
                    if !record.is_present() {
                        debug!("Skipping empty {} slot {}", category, record.index);
                        summary.record_skip(category);
                        continue;
                    }
                    let file = self.extract_asset(category, record, &dir)?;
                    summary.record_file(file);
                }
            }
        }

        Ok(())
    }

    /// Copy a region record's byte range verbatim
    pub fn extract_region(
        &mut self,
        category: Category,
        record: &RegionRecord,
        dir: &Path,
    ) -> Result<ExtractedFile> {
        let range = record.byte_range(category.length_unit(), self.block_size)?;
        let path = dir.join(output_file_name(category, record.index, ""));

        self.reader.seek(range.offset)?;
        let mut out = create_file(dir, &path)?;
        let bytes = self.reader.copy_exact(range.len, &mut out)?;
        finish_file(out, &path)?;

        info!("{}", path.display());
        Ok(ExtractedFile {
            category,
            index: record.index,
            path,
            bytes,
        })
    }

    /// Copy an audio asset: its header followed by the payload it declares
    pub fn extract_asset(
        &mut self,
        category: Category,
        record: &LocationRecord,
        dir: &Path,
    ) -> Result<ExtractedFile> {
        self.reader.seek(record.byte_offset(self.block_size)?)?;
        let header = AssetHeader::read(&mut *self.reader)?;
        let path = dir.join(output_file_name(category, record.index, &header.name));

        let mut out = create_file(dir, &path)?;
        out.write_all(&header.raw)
            .map_err(|source| ExtractError::WriteFile {
                path: path.clone(),
                source,
            })?;
        let payload = self
            .reader
            .copy_exact(u64::from(header.payload_length), &mut out)?;
        finish_file(out, &path)?;

        info!("{}", path.display());
        Ok(ExtractedFile {
            category,
            index: record.index,
            path,
            bytes: header.raw.len() as u64 + payload,
        })
    }
}

// Staged next to its final path; dropped (and deleted) unless finished.
fn create_file(dir: &Path, path: &Path) -> Result<BufWriter<NamedTempFile>> {
    NamedTempFile::new_in(dir)
        .map(BufWriter::new)
        .map_err(|source| ExtractError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
}

fn finish_file(out: BufWriter<NamedTempFile>, path: &Path) -> Result<()> {
    let staged = out.into_inner().map_err(|e| ExtractError::WriteFile {
        path: path.to_path_buf(),
        source: e.into_error(),
    })?;
    staged.persist(path).map_err(|e| ExtractError::WriteFile {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;
    use tocrip_formats::TocError;

    const BS: u64 = 16;

    fn patterned_image(sectors: usize) -> Vec<u8> {
        (0..sectors * BS as usize).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_output_names() {
        assert_eq!(output_file_name(Category::Wads, 0, ""), "wad_0.wad");
        assert_eq!(output_file_name(Category::Wads2, 12, ""), "wad2_12.wad");
        assert_eq!(output_file_name(Category::Video, 3, ""), "video_3.bik");
        assert_eq!(output_file_name(Category::Vags, 7, "FOO"), "FOO_7.vag");
        assert_eq!(output_file_name(Category::Vags2, 8, "FOO"), "FOO_8.vag2");
        assert_eq!(output_file_name(Category::Vags, 1, ""), "_1.vag");
    }

    #[test]
    fn test_asset_names_cannot_escape() {
        assert_eq!(
            output_file_name(Category::Vags, 0, "../x"),
            ".._x_0.vag"
        );
        assert_eq!(output_file_name(Category::Vags2, 0, "a\\b"), "a_b_0.vag2");
    }

    #[test]
    fn test_extract_region_sectors() {
        let image = patterned_image(8);
        let mut reader = ByteReader::new(Cursor::new(image.clone()));
        let dir = tempdir().expect("tempdir");

        let mut extractor = Extractor::new(&mut reader, BS, dir.path());
        let file = extractor
            .extract_region(Category::Wads, &RegionRecord::new(4, 2, 3), dir.path())
            .unwrap();

        assert_eq!(file.path, dir.path().join("wad_4.wad"));
        assert_eq!(file.bytes, 48);
        assert_eq!(fs::read(&file.path).unwrap(), &image[32..80]);
    }

    #[test]
    fn test_extract_region_video_bytes() {
        let image = patterned_image(8);
        let mut reader = ByteReader::new(Cursor::new(image.clone()));
        let dir = tempdir().expect("tempdir");

        let mut extractor = Extractor::new(&mut reader, BS, dir.path());
        let file = extractor
            .extract_region(Category::Video, &RegionRecord::new(0, 5, 7), dir.path())
            .unwrap();

        assert_eq!(file.bytes, 7);
        assert_eq!(fs::read(&file.path).unwrap(), &image[80..87]);
    }

    #[test]
    fn test_extract_asset_copies_header_and_payload() {
        let mut image = vec![0u8; 3 * BS as usize];
        image.extend_from_slice(&AssetHeader::build("HIT", 5));
        image.extend_from_slice(&[9, 8, 7, 6, 5, 0xEE, 0xEE]);

        let mut reader = ByteReader::new(Cursor::new(image.clone()));
        let dir = tempdir().expect("tempdir");

        let mut extractor = Extractor::new(&mut reader, BS, dir.path());
        let file = extractor
            .extract_asset(Category::Vags, &LocationRecord::new(2, 3), dir.path())
            .unwrap();

        assert_eq!(file.path, dir.path().join("HIT_2.vag"));
        assert_eq!(file.bytes, 0x30 + 5);
        assert_eq!(fs::read(&file.path).unwrap(), &image[48..48 + 0x30 + 5]);
    }

    #[test]
    fn test_truncated_region_is_io_error() {
        let mut reader = ByteReader::new(Cursor::new(patterned_image(4)));
        let dir = tempdir().expect("tempdir");

        let mut extractor = Extractor::new(&mut reader, BS, dir.path());
        let err = extractor
            .extract_region(Category::Wads, &RegionRecord::new(0, 3, 2), dir.path())
            .unwrap_err();

        assert!(matches!(
            err,
            ExtractError::Format(TocError::UnexpectedEof {
                expected: 32,
                actual: 16,
                ..
            })
        ));
    }

    #[test]
    fn test_failed_region_leaves_no_file() {
        let mut reader = ByteReader::new(Cursor::new(patterned_image(2)));
        let dir = tempdir().expect("tempdir");

        let mut extractor = Extractor::new(&mut reader, BS, dir.path());
        let err = extractor
            .extract_region(Category::Wads, &RegionRecord::new(0, 1, 4), dir.path())
            .unwrap_err();

        assert!(matches!(err, ExtractError::Format(TocError::UnexpectedEof { .. })));
        assert!(!dir.path().join("wad_0.wad").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_asset_leaves_no_file() {
        let mut image = vec![0u8; BS as usize];
        image.extend_from_slice(&AssetHeader::build("CUT", 64));
        image.extend_from_slice(&[1, 2, 3]);

        let mut reader = ByteReader::new(Cursor::new(image));
        let dir = tempdir().expect("tempdir");

        let mut extractor = Extractor::new(&mut reader, BS, dir.path());
        let err = extractor
            .extract_asset(Category::Vags2, &LocationRecord::new(5, 1), dir.path())
            .unwrap_err();

        assert!(matches!(
            err,
            ExtractError::Format(TocError::UnexpectedEof {
                expected: 64,
                actual: 3,
                ..
            })
        ));
        assert!(!dir.path().join("CUT_5.vag2").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_summary_counts() {
        let toc = Toc {
            wads: vec![
                RegionRecord::new(0, 1, 1),
                RegionRecord::new(1, 0, 1),
                RegionRecord::new(2, 1, 0),
            ],
            video: vec![RegionRecord::new(0, 2, 3)],
            vags2: vec![LocationRecord::new(0, 0)],
            ..Toc::default()
        };
        let mut reader = ByteReader::new(Cursor::new(patterned_image(4)));
        let dir = tempdir().expect("tempdir");

        let summary = Extractor::new(&mut reader, BS, dir.path())
            .extract_all(&toc)
            .unwrap();

        assert_eq!(summary.files_written(), 2);
        assert_eq!(summary.skipped(), 3);
        assert_eq!(summary.bytes_written(), 16 + 3);
        assert_eq!(
            summary.category(Category::Wads),
            CategoryStats {
                written: 1,
                skipped: 2,
                bytes: 16
            }
        );
        assert_eq!(summary.category(Category::Vags), CategoryStats::default());
        for category in Category::ALL {
            assert!(dir.path().join(category.name()).is_dir());
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn output_name_stays_in_directory(name in "[ -~]{0,16}", index in any::<u32>()) {
                for category in [Category::Vags, Category::Vags2] {
                    let file = output_file_name(category, index, &name);
                    prop_assert!(!file.contains('/'));
                    prop_assert!(!file.contains('\\'));
                    let suffix = format!("_{index}.");
                    prop_assert!(file.contains(&suffix));
                }
            }
        }
    }
}
