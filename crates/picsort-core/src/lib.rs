//! Core functionality for sorting media files into a date-bucketed archive.
//!
//! This library provides the foundational components for media sorting:
//! - Candidate file discovery and metadata extraction
//! - Content fingerprinting for duplicate detection
//! - Date-bucket classification from modification times
//! - Collision-free placement resolution and atomic moves

// -- External Dependencies --

use log::{debug, info};

// -- Standard Library --
use std::fs;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod datebucket;
pub mod discovery;
pub mod fingerprint;
pub mod placement;
pub mod types;

/// Main entry point for the sorting process
pub struct MediaSorter {
    config: Config,
}

impl MediaSorter {
    /// Create a new MediaSorter with the provided configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Discover all candidate media files in the source directory
    pub fn discover_candidates(&self) -> Result<Vec<MediaFile>> {
        discovery::discover_media(&self.config.source_dir)
    }

    /// Run the full sorting pipeline.
    ///
    /// Validates both roots, then processes candidates one at a time:
    /// classify by modification date, resolve a destination slot, and
    /// either rename the file into place or leave it behind as a known
    /// duplicate. The first I/O failure aborts the run; files already
    /// moved stay moved.
    pub fn run(&self) -> Result<SortSummary> {
        self.config.validate()?;

        println!("Checking directory {}", self.config.source_dir.display());
        let candidates = self.discover_candidates()?;
        debug!("{} candidate files", candidates.len());

        let mut summary = SortSummary::default();

        for candidate in &candidates {
            let bucket = datebucket::date_bucket(candidate.last_modified);
            let resolved = placement::resolve(
                &candidate.path,
                &self.config.dest_dir,
                &bucket,
                &self.config.prefix,
            )?;

            match resolved {
                Placement::Placed(dest) => {
                    self.move_into_place(&candidate.path, &dest)?;
                    summary.moved += 1;
                }
                Placement::Duplicate => {
                    println!(
                        "\tFile {} already in {}, skipping",
                        candidate.path.display(),
                        self.config.dest_dir.join(&bucket).display()
                    );
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "Run complete: {} moved, {} skipped",
            summary.moved, summary.skipped
        );
        Ok(summary)
    }

    /// Move a file to its resolved destination, creating the bucket
    /// directory on demand. A rename keeps the move atomic; there is never
    /// a copy-then-delete window.
    fn move_into_place(&self, source: &std::path::Path, dest: &std::path::Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        println!("\tFile {} moving to {}", source.display(), dest.display());
        fs::rename(source, dest)?;
        Ok(())
    }
}
