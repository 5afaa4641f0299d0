// src/file_utils.rs

use crate::config::{APP_NAME, SCHEDULE_FILE_NAME, VIDEO_EXTENSIONS};
use std::{
    fs,
    io::{Error as IoError, ErrorKind as IoErrorKind},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Returns the full path to the application's data directory.
/// This function creates the directory if it does not already exist.
///
/// # Errors
///
/// Returns an error if the system's data directory cannot be determined
/// or if creating the application data directory fails.
pub fn get_app_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir_base = dirs::data_dir().ok_or_else(|| {
        IoError::new(
            IoErrorKind::NotFound,
            "Failed to determine the system's data directory.",
        )
    })?;

    let app_data_dir = data_dir_base.join(APP_NAME);
    fs::create_dir_all(&app_data_dir)?;

    Ok(app_data_dir)
}

/// Default location for schedule exports, inside the app data directory.
pub fn get_schedule_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(get_app_data_dir()?.join(SCHEDULE_FILE_NAME))
}

/// Whether the path has one of the recognized video extensions (case-insensitive).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Scans the specified folder for files with recognized video extensions.
/// Results are sorted so repeated scans register files in the same order.
///
/// # Arguments
///
/// * `folder_path` - The path to the directory to be scanned.
/// * `recursive` - If true, subdirectories are scanned; otherwise only the top level.
///
/// # Errors
///
/// Returns an error if `folder_path` is not a directory or if walking it fails.
pub fn find_video_files(
    folder_path: &Path,
    recursive: bool,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !folder_path.is_dir() {
        return Err(Box::new(IoError::new(
            IoErrorKind::InvalidInput,
            format!("Path is not a directory: {}", folder_path.display()),
        )));
    }

    let mut walker = WalkDir::new(folder_path).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut video_files = Vec::new();
    for entry_result in walker {
        let entry = entry_result?;
        let path = entry.path();
        if path.is_file() && is_video_file(path) {
            video_files.push(path.to_path_buf());
        }
    }
    video_files.sort();
    Ok(video_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("a/b/movie.MKV")));
        assert!(is_video_file(Path::new("clip.mp4")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("no_extension")));
    }

    #[test]
    fn test_find_video_files_respects_recursion() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        File::create(dir.path().join("b.mp4")).unwrap();
        File::create(dir.path().join("a.webm")).unwrap();
        File::create(dir.path().join("readme.md")).unwrap();
        File::create(nested.join("c.mov")).unwrap();

        let top = find_video_files(dir.path(), false).unwrap();
        assert_eq!(top, vec![dir.path().join("a.webm"), dir.path().join("b.mp4")]);

        let all = find_video_files(dir.path(), true).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&nested.join("c.mov")));
    }

    #[test]
    fn test_find_video_files_rejects_non_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(find_video_files(file.path(), true).is_err());
    }
}
