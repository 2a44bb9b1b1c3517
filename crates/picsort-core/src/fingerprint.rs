/// Functions for fingerprinting file content for duplicate detection
use crate::error::Result;
use blake3::Hash as Blake3Hash;

use std::{fs::File, io::Read, path::Path};

/// Compute the content fingerprint of a file using the Blake3 algorithm
pub fn fingerprint_file<P: AsRef<Path>>(path: P) -> Result<Blake3Hash> {
    // Open the file with explicit scope to ensure it's closed promptly
    let hash = {
        let mut file = File::open(&path)?;

        let mut hasher = blake3::Hasher::new();

        // Read the file in chunks and update the hasher
        let mut buffer = [0; 8192]; // 8KB buffer
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        hasher.finalize()
    };

    Ok(hash)
}

// -- Tests --
