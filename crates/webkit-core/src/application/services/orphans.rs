//! Producers that deal with files the current definition no longer emits.
//!
//! Both must run after every content producer, so the tracker already holds
//! everything this run generated.

use crate::application::pipeline::{CommandInput, Producer, RunContext};
use crate::domain::FileEntry;
use crate::error::WebkitResult;

/// Deletes orphaned generated files and drops them from the manifest.
pub const ORPHAN_CLEANUP: Producer = Producer::new("orphan_cleanup", cleanup);

/// Keeps orphaned entries in the manifest so drift keeps reporting them.
pub const ORPHAN_REPORT: Producer = Producer::new("orphan_report", report);

/// Non-scaffold entries of the previous manifest that were not produced this
/// run and are still on disk.
pub fn find_orphans(input: &CommandInput) -> Vec<FileEntry> {
    let Some(previous) = input.previous_manifest() else {
        return Vec::new();
    };

    previous
        .entries()
        .filter(|e| !e.scaffold_mode)
        .filter(|e| input.tracker().get(&e.path).is_none())
        .filter(|e| input.fs().exists(std::path::Path::new(&e.path)))
        .cloned()
        .collect()
}

fn cleanup(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    for orphan in find_orphans(input) {
        input.generator().remove(&orphan.path)?;
        input.note_orphan(orphan.path);
    }
    Ok(())
}

fn report(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    for orphan in find_orphans(input) {
        let path = orphan.path.clone();
        input.tracker().add(orphan)?;
        input.note_orphan(path);
    }
    Ok(())
}
