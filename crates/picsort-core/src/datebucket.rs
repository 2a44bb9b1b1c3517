use chrono::{DateTime, Local};
use std::time::SystemTime;

/// Derive the destination folder name from a file's last-modified time.
///
/// The bucket is a fixed-width `YYYY_MM_DD` string rendered in the local
/// timezone, so the same timestamp always lands in the same folder within
/// a run.
pub fn date_bucket(last_modified: SystemTime) -> String {
    let datetime: DateTime<Local> = DateTime::from(last_modified);
    datetime.format("%Y_%m_%d").to_string()
}

// -- Tests --
