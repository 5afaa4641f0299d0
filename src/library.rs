// src/library.rs

use crate::{
    file_record::FileRecord,
    file_utils::find_video_files,
    metadata_retriever::probe_duration,
};
use log::{info, warn};
use std::path::Path;

/// Builds a record for `path`: the full path is the id, the file name the display name.
pub fn build_file_record(path: &Path, duration: f64) -> FileRecord {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    FileRecord::new(path.to_string_lossy().into_owned(), name, duration)
}

/// Turns scanned paths into records using `probe` to read each duration.
/// Files whose duration cannot be read are logged and skipped.
pub fn build_file_records<P>(paths: &[impl AsRef<Path>], mut probe: P) -> Vec<FileRecord>
where
    P: FnMut(&Path) -> Result<f64, Box<dyn std::error::Error>>,
{
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        match probe(path) {
            Ok(duration) => records.push(build_file_record(path, duration)),
            Err(e) => warn!("Skipping '{}': {}", path.display(), e),
        }
    }
    records
}

/// Scans `folder` for videos and probes each one with ffprobe.
///
/// # Errors
///
/// Returns an error if the folder cannot be scanned. Individual files that
/// fail to probe are skipped.
pub fn load_folder(
    folder: &Path,
    recursive: bool,
) -> Result<Vec<FileRecord>, Box<dyn std::error::Error>> {
    let paths = find_video_files(folder, recursive)?;
    let records = build_file_records(&paths, probe_duration);
    info!(
        "Loaded {} of {} video files from '{}'",
        records.len(),
        paths.len(),
        folder.display()
    );
    Ok(records)
}
