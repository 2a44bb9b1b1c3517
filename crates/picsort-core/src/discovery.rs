use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{MediaFile, MediaFormat};

/// Discover candidate media files in a source directory.
///
/// Only direct entries are considered; subdirectories are not descended
/// into. Files whose extension is not on the allow-list are ignored. An
/// unreadable entry or metadata failure aborts the run.
pub fn discover_media(directory: &Path) -> Result<Vec<MediaFile>> {
    if !directory.exists() {
        return Err(Error::MissingDirectory(directory.to_path_buf()));
    }

    let mut media_files = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match get_media_format(path) {
            Some(format) if format.is_supported() => {
                let (size, last_modified) = get_file_metadata(path)?;
                media_files.push(MediaFile {
                    path: path.to_path_buf(),
                    size,
                    last_modified,
                    format,
                });
            }
            _ => continue,
        }
    }

    Ok(media_files)
}

/// Get media format from file extension
fn get_media_format(path: &Path) -> Option<MediaFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(MediaFormat::from_extension)
}

/// Get file metadata
fn get_file_metadata(path: &Path) -> Result<(u64, std::time::SystemTime)> {
    let metadata = fs::metadata(path)?;
    Ok((metadata.len(), metadata.modified()?))
}

/// Returns if the given path has an allow-listed media extension
pub fn is_media_path(path: &Path) -> bool {
    match get_media_format(path) {
        Some(format) => format.is_supported(),
        None => false,
    }
}

// -- Tests --
