use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// Supported media formats
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    Jpeg,
    Mp4,
    Other(String),
}

impl MediaFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" => Self::Jpeg,
            "mp4" => Self::Mp4,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if format is on the sorting allow-list
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Jpeg | Self::Mp4 => true,
            Self::Other(_) => false,
        }
    }
}

/// Representation of a candidate media file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Full path to the media file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Last modified timestamp
    pub last_modified: SystemTime,

    /// Media format
    pub format: MediaFormat,
}

/// Outcome of placement resolution for one candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A free destination slot was found; move the file here
    Placed(PathBuf),

    /// Byte-identical content already exists at the destination; skip the file
    Duplicate,
}

/// Counts reported at the end of a sorting run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSummary {
    /// Files moved into the destination tree
    pub moved: usize,

    /// Files skipped as duplicates of existing destination content
    pub skipped: usize,
}
