//! The persisted record of every file the tool has produced.
//!
//! A flat `path → entry` table. Keys are canonical paths (see
//! [`crate::domain::path`]); a `BTreeMap` keeps iteration, and therefore the
//! serialized document, sorted by path so the manifest diffs cleanly between
//! runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::source::Source;

/// Location of the manifest, relative to the project root.
pub const MANIFEST_PATH: &str = ".webkit/manifest.json";

/// One tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    /// Free-form producer label, e.g. `files::package_json`.
    pub generator: String,
    pub source: Source,
    /// SHA-256 hex of the bytes written at creation time.
    pub hash: String,
    /// User-owned after first creation; excluded from drift hashing.
    pub scaffold_mode: bool,
    pub generated_at: DateTime<Utc>,
}

/// The manifest document as stored in `.webkit/manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub files: BTreeMap<String, FileEntry>,
}

impl Manifest {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            generated_at: Utc::now(),
            files: BTreeMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.values()
    }
}
