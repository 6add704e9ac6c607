//! JSON export of a decoded ToC

use crate::error::{ExtractError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tocrip_formats::Toc;
use tracing::info;

/// Serialize `toc` as JSON with a four-space indent
pub fn write_toc_json<W: Write>(toc: &Toc, writer: W) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    toc.serialize(&mut serializer)
}

/// Render `toc` as a JSON string
pub fn toc_to_json(toc: &Toc) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_toc_json(toc, &mut buf)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the ToC dump to `path`, replacing any existing file
pub fn dump_toc(toc: &Toc, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ExtractError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    write_toc_json(toc, &mut writer).map_err(|source| ExtractError::DumpToc {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| ExtractError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Dumped ToC to {}", path.display());
    Ok(())
}
