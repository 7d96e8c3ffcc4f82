//! Three-way drift classification.
//!
//! Compares the actual tree (plus the manifest it was last generated with)
//! against a freshly regenerated expected tree (plus its manifest).

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::application::ports::Filesystem;
use crate::domain::{DriftEntry, DriftReason, FileEntry, Manifest, hash_content};
use crate::error::WebkitResult;

/// Classify every deviation between the actual and expected trees.
///
/// Scaffold-mode entries are ignored on both sides. Entries come out in path
/// order: expected-side findings first, then orphans. A file that exists on
/// the actual tree but cannot be read is an error, not drift.
#[instrument(skip_all, fields(expected = expected.len(), previous = previous.len()))]
pub fn classify(
    actual_fs: &dyn Filesystem,
    expected_fs: &dyn Filesystem,
    previous: &Manifest,
    expected: &Manifest,
) -> WebkitResult<Vec<DriftEntry>> {
    let mut drift = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (path, entry) in &expected.files {
        seen.insert(path.as_str());
        if entry.scaffold_mode {
            continue;
        }

        let Ok(expected_bytes) = expected_fs.read_file(Path::new(path)) else {
            trace!(%path, "Expected file unreadable, skipping");
            continue;
        };

        if !actual_fs.exists(Path::new(path)) {
            drift.push(drift_entry(entry, DriftReason::New));
            continue;
        }
        let actual_bytes = actual_fs.read_file(Path::new(path))?;

        let actual_hash = hash_content(&actual_bytes);
        if hash_content(&expected_bytes) == actual_hash {
            continue;
        }

        let reason = match previous.get(path) {
            Some(prev) if prev.hash == actual_hash => DriftReason::Outdated,
            _ => DriftReason::Modified,
        };
        drift.push(drift_entry(entry, reason));
    }

    for (path, entry) in &previous.files {
        if seen.contains(path.as_str()) || entry.scaffold_mode {
            continue;
        }
        if actual_fs.exists(Path::new(path)) {
            drift.push(drift_entry(entry, DriftReason::Deleted));
        }
    }

    debug!(count = drift.len(), "Drift classified");
    Ok(drift)
}

fn drift_entry(entry: &FileEntry, reason: DriftReason) -> DriftEntry {
    DriftEntry {
        path: entry.path.clone(),
        reason,
        source: entry.source.clone(),
        generator: entry.generator.clone(),
    }
}
