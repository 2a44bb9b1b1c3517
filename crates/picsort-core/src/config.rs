use std::path::PathBuf;

use crate::error::{Error, Result};

/// Configuration for a sorting run
#[derive(Debug, Clone)]
pub struct Config {
    /// Flat directory holding the files to sort
    pub source_dir: PathBuf,

    /// Root of the date-bucketed destination tree
    pub dest_dir: PathBuf,

    /// Naming prefix applied to every newly placed file
    pub prefix: String,
}

impl Config {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Check preconditions before any file is touched. Both roots must
    /// already exist; neither is created on the caller's behalf.
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(Error::MissingDirectory(self.source_dir.clone()));
        }
        if !self.dest_dir.is_dir() {
            return Err(Error::MissingDirectory(self.dest_dir.clone()));
        }
        Ok(())
    }
}

// -- Tests --
