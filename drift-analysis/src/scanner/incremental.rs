//! Incremental scan support: classify a discovered file against its cached
//! metadata, then fold all classifications into a `ScanDiff`.

use std::path::PathBuf;

use drift_core::errors::ScanError;
use drift_core::types::collections::FxHashMap;

use super::types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScanEntry, ScanStats};

/// Classify one discovered file against its cached metadata. When
/// `force_full` is set, mtime is ignored and the file is always re-hashed.
pub fn classify_file(
    file: &DiscoveredFile,
    cached: Option<&CachedFileMetadata>,
    force_full: bool,
) -> Result<(FileStatus, ScanEntry), ScanError> {
    let status = match cached {
        None => FileStatus::Added,
        Some(c) if !force_full && c.mtime == file.mtime && c.file_size == file.file_size => {
            FileStatus::Unchanged
        }
        Some(_) => FileStatus::Modified,
    };

    let content_hash = if status == FileStatus::Unchanged {
        None
    } else {
        Some(hash_file(&file.path)?)
    };

    let entry = ScanEntry {
        path: file.path.clone(),
        file_size: file.file_size,
        language: file.language,
        content_hash,
    };

    Ok((status, entry))
}

fn hash_file(path: &std::path::Path) -> Result<Vec<u8>, ScanError> {
    let bytes = std::fs::read(path).map_err(|e| ScanError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let hash = xxhash_rust::xxh3::xxh3_128(&bytes);
    Ok(hash.to_be_bytes().to_vec())
}

/// Fold per-file classifications into a single diff, carrying over
/// `removed` entries for any cache key not seen in this walk.
pub fn compute_diff(
    entries: Vec<(FileStatus, ScanEntry)>,
    cached_metadata: &FxHashMap<PathBuf, CachedFileMetadata>,
    stats: ScanStats,
) -> ScanDiff {
    let mut diff = ScanDiff {
        stats,
        ..Default::default()
    };

    let mut seen: std::collections::HashSet<PathBuf> = std::collections::HashSet::new();

    for (status, entry) in entries {
        seen.insert(entry.path.clone());
        match status {
            FileStatus::Added => diff.added.push(entry),
            FileStatus::Modified => diff.modified.push(entry),
            FileStatus::Unchanged => diff.unchanged.push(entry.path),
            FileStatus::Removed => diff.removed.push(entry.path),
        }
    }

    for path in cached_metadata.keys() {
        if !seen.contains(path) {
            diff.removed.push(path.clone());
        }
    }

    diff
}
