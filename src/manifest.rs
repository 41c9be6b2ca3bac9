// Output file: the uploaded photos' names and sizes, without source URLs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::ManifestError;
use crate::model::{ManifestEntry, SelectedPhoto};

pub fn build_manifest(photos: &[SelectedPhoto]) -> Vec<ManifestEntry> {
    photos.iter().map(ManifestEntry::from).collect()
}

/// Write `entries` as a JSON array to `path`, replacing any previous file.
/// The file handle is dropped on every return path.
pub fn write_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<(), ManifestError> {
    let io_err = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, entries)?;
    writer.flush().map_err(io_err)?;
    info!(path = %path.display(), entries = entries.len(), "manifest written");
    Ok(())
}
