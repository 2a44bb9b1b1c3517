//! Placement resolution: decide where a candidate file lands in the
//! destination tree, or whether it is a duplicate of content already there.
//!
//! The destination tree itself is the dedup index. A candidate may match an
//! existing file under the current naming convention (`{prefix}_{name}`) or
//! under the legacy convention of earlier runs (bare `{name}`); both slots
//! are consulted before a name is claimed, but new files are only ever
//! placed under the prefixed name.

use blake3::Hash as Blake3Hash;
use log::debug;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fingerprint::fingerprint_file;
use crate::types::Placement;

/// Upper bound on collision-attempt names tried per file. Hitting it means
/// something is pathologically wrong with the destination tree, not a
/// normal outcome.
pub const MAX_ATTEMPTS: u32 = 10_000;

/// Build the attempt-numbered variant of a file name.
///
/// Attempt 0 is the name unchanged. Attempt N splices `_N` in at the
/// *first* dot: `image1.jpg` becomes `image1_1.jpg`, but `my.photo.jpg`
/// becomes `my_1.photo.jpg`. The first-dot split is deliberate; it matches
/// the long-standing behavior of existing archives, so renaming it
/// "correctly" would orphan their numbered files.
fn attempt_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.find('.') {
        Some(dot) => format!("{}_{}{}", &name[..dot], attempt, &name[dot..]),
        None => format!("{}_{}", name, attempt),
    }
}

/// Resolve the destination for one candidate file.
///
/// Returns `Placement::Placed(path)` with a free, prefixed destination
/// path, or `Placement::Duplicate` if byte-identical content already sits
/// at a prefixed or legacy slot. Any I/O failure while hashing or probing
/// is fatal for the run and propagates.
pub fn resolve(
    source: &Path,
    dest_root: &Path,
    bucket: &str,
    prefix: &str,
) -> Result<Placement> {
    resolve_bounded(source, dest_root, bucket, prefix, MAX_ATTEMPTS)
}

/// Resolution loop with an explicit attempt bound
fn resolve_bounded(
    source: &Path,
    dest_root: &Path,
    bucket: &str,
    prefix: &str,
    max_attempts: u32,
) -> Result<Placement> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidFileName(source.to_path_buf()))?;

    // Hash the source once up front; every probe compares against it.
    let source_hash = fingerprint_file(source)?;
    let bucket_dir = dest_root.join(bucket);

    for attempt in 0..max_attempts {
        let candidate = attempt_name(file_name, attempt);
        let prefixed_path = bucket_dir.join(format!("{}_{}", prefix, candidate));
        let legacy_path = bucket_dir.join(&candidate);

        let prefixed_taken = prefixed_path.exists();
        if prefixed_taken && matches_hash(&prefixed_path, &source_hash)? {
            debug!(
                "{} duplicates {}",
                source.display(),
                prefixed_path.display()
            );
            return Ok(Placement::Duplicate);
        }

        // Earlier runs placed files without a prefix; a content match there
        // is just as much a duplicate.
        if legacy_path.exists() && matches_hash(&legacy_path, &source_hash)? {
            debug!("{} duplicates {}", source.display(), legacy_path.display());
            return Ok(Placement::Duplicate);
        }

        // The prefixed slot is the only one ever claimed, so a free
        // prefixed slot ends the search even if the legacy slot is held by
        // unrelated content.
        if !prefixed_taken {
            if attempt > 0 {
                debug!(
                    "{} placed after {} collision attempts",
                    source.display(),
                    attempt
                );
            }
            return Ok(Placement::Placed(prefixed_path));
        }
    }

    Err(Error::NamespaceExhausted {
        path: source.to_path_buf(),
        attempts: max_attempts,
    })
}

/// Fingerprint an existing destination file and compare against the source
fn matches_hash(path: &Path, source_hash: &Blake3Hash) -> Result<bool> {
    Ok(fingerprint_file(path)? == *source_hash)
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const BUCKET: &str = "1969_12_31";

    fn seed(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn seed_bucket(dest: &Path, name: &str, content: &[u8]) -> PathBuf {
        let bucket_dir = dest.join(BUCKET);
        fs::create_dir_all(&bucket_dir).unwrap();
        seed(&bucket_dir, name, content)
    }

    #[test]
    fn test_attempt_name_zero_is_unchanged() {
        assert_eq!(attempt_name("image1.jpg", 0), "image1.jpg");
    }

    #[test]
    fn test_attempt_name_numbers_at_extension() {
        assert_eq!(attempt_name("image1.jpg", 1), "image1_1.jpg");
        assert_eq!(attempt_name("image1.jpg", 12), "image1_12.jpg");
    }

    #[test]
    fn test_attempt_name_splits_at_first_dot() {
        // Multi-dot names split at the first dot, not the extension.
        assert_eq!(attempt_name("my.photo.jpg", 1), "my_1.photo.jpg");
    }

    #[test]
    fn test_attempt_name_without_dot() {
        assert_eq!(attempt_name("README", 3), "README_3");
    }

    #[test]
    fn test_empty_destination_places_prefixed_name() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(
            placement,
            Placement::Placed(dest.path().join(BUCKET).join("jon_image1.jpg"))
        );
    }

    #[test]
    fn test_identical_prefixed_content_is_duplicate() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "jon_image1.jpg", b"foo");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(placement, Placement::Duplicate);
    }

    #[test]
    fn test_different_prefixed_content_gets_numbered_slot() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "jon_image1.jpg", b"bar");
        seed_bucket(dest.path(), "jon_image2.jpg", b"");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(
            placement,
            Placement::Placed(dest.path().join(BUCKET).join("jon_image1_1.jpg"))
        );
    }

    #[test]
    fn test_legacy_unprefixed_duplicate_is_detected() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "image1.jpg", b"foo");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(placement, Placement::Duplicate);
    }

    #[test]
    fn test_free_prefixed_slot_wins_over_occupied_legacy_slot() {
        // Legacy slot holds unrelated content; the free prefixed slot at
        // the same attempt index still terminates the search.
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "image1.jpg", b"unrelated");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(
            placement,
            Placement::Placed(dest.path().join(BUCKET).join("jon_image1.jpg"))
        );
    }

    #[test]
    fn test_duplicate_found_at_numbered_attempt() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "jon_image1.jpg", b"bar");
        seed_bucket(dest.path(), "jon_image1_1.jpg", b"foo");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(placement, Placement::Duplicate);
    }

    #[test]
    fn test_skips_successive_occupied_slots() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "jon_image1.jpg", b"aaa");
        seed_bucket(dest.path(), "jon_image1_1.jpg", b"bbb");
        seed_bucket(dest.path(), "jon_image1_2.jpg", b"ccc");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(
            placement,
            Placement::Placed(dest.path().join(BUCKET).join("jon_image1_3.jpg"))
        );
    }

    #[test]
    fn test_multi_dot_collision_name() {
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "my.photo.jpg", b"foo");
        seed_bucket(dest.path(), "jon_my.photo.jpg", b"bar");

        let placement = resolve(&source, dest.path(), BUCKET, "jon").unwrap();
        assert_eq!(
            placement,
            Placement::Placed(dest.path().join(BUCKET).join("jon_my_1.photo.jpg"))
        );
    }

    #[test]
    fn test_exhausted_attempt_bound_is_fatal() {
        // Every prefixed slot up to the bound holds different content, so
        // the loop runs out of names and fails rather than spinning.
        let source_dir = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let source = seed(source_dir.path(), "image1.jpg", b"foo");
        seed_bucket(dest.path(), "jon_image1.jpg", b"taken-0");
        seed_bucket(dest.path(), "jon_image1_1.jpg", b"taken-1");
        seed_bucket(dest.path(), "jon_image1_2.jpg", b"taken-2");

        let result = resolve_bounded(&source, dest.path(), BUCKET, "jon", 3);
        assert!(matches!(
            result,
            Err(Error::NamespaceExhausted { attempts: 3, .. })
        ));

        // One more attempt would have found a free slot.
        let placement = resolve_bounded(&source, dest.path(), BUCKET, "jon", 4).unwrap();
        assert_eq!(
            placement,
            Placement::Placed(dest.path().join(BUCKET).join("jon_image1_3.jpg"))
        );
    }

    #[test]
    fn test_unreadable_source_is_an_error() {
        let dest = tempdir().unwrap();
        let missing = dest.path().join("never-created.jpg");
        assert!(resolve(&missing, dest.path(), BUCKET, "jon").is_err());
    }
}
