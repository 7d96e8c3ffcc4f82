//! Manifest tracker: the in-run record of generated files.
//!
//! Entries are keyed by canonical path and held behind a mutex so producers
//! can record from any thread. `save` writes the sorted map as the manifest
//! document; `load` reads it back.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, encode, ports::Filesystem};
use crate::domain::{FileEntry, MANIFEST_PATH, Manifest, path};
use crate::error::WebkitResult;

/// Written first, then renamed over [`MANIFEST_PATH`].
const MANIFEST_STAGING: &str = ".webkit/manifest.json.tmp";

#[derive(Debug)]
pub struct Tracker {
    version: String,
    files: Mutex<BTreeMap<String, FileEntry>>,
}

impl Tracker {
    /// Empty tracker stamped with the running tool version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            files: Mutex::new(BTreeMap::new()),
        }
    }

    /// Resume from a loaded manifest, keeping its version.
    pub fn from_manifest(manifest: Manifest) -> Self {
        Self {
            version: manifest.version,
            files: Mutex::new(manifest.files),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Insert or overwrite by canonical path.
    pub fn add(&self, mut entry: FileEntry) -> WebkitResult<()> {
        entry.path = path::canonicalize(&entry.path)?;
        debug!(path = %entry.path, source = %entry.source, "Tracking file");
        self.lock()?.insert(entry.path.clone(), entry);
        Ok(())
    }

    /// Drop an entry. Returns it if it was tracked.
    pub fn remove(&self, path: &str) -> WebkitResult<Option<FileEntry>> {
        let key = path::canonicalize(path)?;
        Ok(self.lock()?.remove(&key))
    }

    pub fn get(&self, path: &str) -> Option<FileEntry> {
        let key = path::canonicalize(path).ok()?;
        self.snapshot_lock().get(&key).cloned()
    }

    /// Snapshot, sorted by path.
    pub fn entries(&self) -> Vec<FileEntry> {
        self.snapshot_lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot_lock().is_empty()
    }

    /// Seed with the scaffold-mode entries of `previous` whose files still
    /// exist on `fs`. Scaffold writes skip existing files and so never
    /// re-record them; this keeps their provenance in the next manifest.
    pub fn carry_over_scaffolded(
        &self,
        previous: &Manifest,
        fs: &dyn Filesystem,
    ) -> WebkitResult<usize> {
        self.carry_over(previous, fs, |e| e.scaffold_mode)
    }

    /// Seed with every entry of `previous` whose file still exists. Used by
    /// create-if-absent runs, which skip generated files too.
    pub fn carry_over_existing(
        &self,
        previous: &Manifest,
        fs: &dyn Filesystem,
    ) -> WebkitResult<usize> {
        self.carry_over(previous, fs, |_| true)
    }

    fn carry_over(
        &self,
        previous: &Manifest,
        fs: &dyn Filesystem,
        keep: impl Fn(&FileEntry) -> bool,
    ) -> WebkitResult<usize> {
        let mut files = self.lock()?;
        let mut carried = 0;
        for entry in previous.entries().filter(|e| keep(e)) {
            if fs.exists(Path::new(&entry.path)) && !files.contains_key(&entry.path) {
                files.insert(entry.path.clone(), entry.clone());
                carried += 1;
            }
        }
        debug!(carried, "Carried over previous entries");
        Ok(carried)
    }

    /// The manifest document as it would be saved now.
    pub fn to_manifest(&self) -> WebkitResult<Manifest> {
        Ok(Manifest {
            version: self.version.clone(),
            generated_at: Utc::now(),
            files: self.lock()?.clone(),
        })
    }

    /// Persist to `.webkit/manifest.json`.
    ///
    /// The document is written beside the target and renamed over it, so an
    /// interrupted save leaves the previous manifest in place.
    #[instrument(skip_all, fields(files = self.len()))]
    pub fn save(&self, fs: &dyn Filesystem) -> WebkitResult<()> {
        let manifest = self.to_manifest()?;
        let target = Path::new(MANIFEST_PATH);

        let data = encode::json_tabs(&manifest).map_err(|e| ApplicationError::Encoding {
            path: target.to_path_buf(),
            format: "json",
            reason: e.to_string(),
        })?;

        if let Some(parent) = target.parent() {
            fs.create_dir_all(parent)?;
        }
        let staging = Path::new(MANIFEST_STAGING);
        fs.write_file(staging, &data)?;
        fs.rename(staging, target)?;

        debug!("Manifest saved");
        Ok(())
    }

    /// Read `.webkit/manifest.json` from `fs`.
    ///
    /// A missing file yields [`ApplicationError::NoManifest`], distinct from
    /// a parse failure.
    pub fn load(fs: &dyn Filesystem) -> WebkitResult<Manifest> {
        let target = Path::new(MANIFEST_PATH);
        if !fs.exists(target) {
            return Err(ApplicationError::NoManifest {
                path: target.to_path_buf(),
            }
            .into());
        }

        let data = fs.read_file(target)?;
        serde_json::from_slice(&data).map_err(|e| {
            ApplicationError::ManifestParse {
                path: target.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn lock(&self) -> WebkitResult<MutexGuard<'_, BTreeMap<String, FileEntry>>> {
        self.files
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    // Read-only views recover from poisoning; the map is never left half-written.
    fn snapshot_lock(&self) -> MutexGuard<'_, BTreeMap<String, FileEntry>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}
