//! In-memory filesystem adapter.
//!
//! Backs the expected tree during drift detection and stands in for disk
//! in tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use webkit_core::{
    application::{
        ApplicationError,
        ports::{FileStat, Filesystem},
    },
    error::WebkitResult,
};

/// In-memory filesystem. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn insert(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> WebkitResult<()> {
        let path = path.as_ref();
        let mut inner = self.write_lock()?;
        if let Some(parent) = path.parent() {
            inner.add_dirs(parent);
        }
        inner
            .files
            .insert(path.to_path_buf(), content.as_ref().to_vec());
        Ok(())
    }

    /// File content as UTF-8 text, if present.
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// All file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) -> WebkitResult<()> {
        let mut inner = self.write_lock()?;
        inner.files.clear();
        inner.directories.clear();
        Ok(())
    }

    fn read_lock(&self) -> WebkitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write_lock(&self) -> WebkitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> WebkitResult<()> {
        let mut inner = self.write_lock()?;
        if inner.files.contains_key(path) {
            return Err(ApplicationError::Mkdir {
                path: path.to_path_buf(),
                reason: "a file exists at this path".into(),
            }
            .into());
        }
        inner.add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> WebkitResult<()> {
        let mut inner = self.write_lock()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::Write {
                    path: path.to_path_buf(),
                    reason: "parent directory does not exist".into(),
                }
                .into());
            }
        }
        if inner.directories.contains(path) {
            return Err(ApplicationError::Write {
                path: path.to_path_buf(),
                reason: "is a directory".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> WebkitResult<Vec<u8>> {
        let inner = self.read_lock()?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::Read {
                path: path.to_path_buf(),
                reason: "file not found".into(),
            }
            .into()
        })
    }

    fn stat(&self, path: &Path) -> WebkitResult<Option<FileStat>> {
        let inner = self.read_lock()?;
        if let Some(data) = inner.files.get(path) {
            return Ok(Some(FileStat {
                is_dir: false,
                len: data.len() as u64,
            }));
        }
        Ok(inner
            .directories
            .contains(path)
            .then_some(FileStat { is_dir: true, len: 0 }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> WebkitResult<()> {
        let mut inner = self.write_lock()?;
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(ApplicationError::Remove {
                path: path.to_path_buf(),
                reason: "file not found".into(),
            }
            .into()),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> WebkitResult<()> {
        let mut inner = self.write_lock()?;
        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::Write {
                    path: to.to_path_buf(),
                    reason: "parent directory does not exist".into(),
                }
                .into());
            }
        }
        let content = inner.files.remove(from).ok_or_else(|| ApplicationError::Write {
            path: to.to_path_buf(),
            reason: format!("{} not found", from.display()),
        })?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> WebkitResult<()> {
        let mut inner = self.write_lock()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn walk(&self, dir: &Path) -> WebkitResult<Vec<PathBuf>> {
        let inner = self.read_lock()?;
        Ok(inner
            .files
            .keys()
            .filter(|p| dir.as_os_str().is_empty() || p.starts_with(dir))
            .cloned()
            .collect())
    }
}
