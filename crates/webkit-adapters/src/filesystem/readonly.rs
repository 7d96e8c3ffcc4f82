//! Read-only wrapper: passes reads through, rejects every mutation.

use std::path::{Path, PathBuf};

use webkit_core::{
    application::{
        ApplicationError,
        ports::{FileStat, Filesystem},
    },
    error::WebkitResult,
};

/// Guards a tree that must not change, such as the project directory while
/// drift is being computed.
#[derive(Debug, Clone)]
pub struct ReadOnlyFilesystem<F> {
    inner: F,
}

impl<F: Filesystem> ReadOnlyFilesystem<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

const READ_ONLY: &str = "filesystem is read-only";

impl<F: Filesystem> Filesystem for ReadOnlyFilesystem<F> {
    fn create_dir_all(&self, path: &Path) -> WebkitResult<()> {
        Err(ApplicationError::Mkdir {
            path: path.to_path_buf(),
            reason: READ_ONLY.into(),
        }
        .into())
    }

    fn write_file(&self, path: &Path, _content: &[u8]) -> WebkitResult<()> {
        Err(ApplicationError::Write {
            path: path.to_path_buf(),
            reason: READ_ONLY.into(),
        }
        .into())
    }

    fn read_file(&self, path: &Path) -> WebkitResult<Vec<u8>> {
        self.inner.read_file(path)
    }

    fn stat(&self, path: &Path) -> WebkitResult<Option<FileStat>> {
        self.inner.stat(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn remove_file(&self, path: &Path) -> WebkitResult<()> {
        Err(ApplicationError::Remove {
            path: path.to_path_buf(),
            reason: READ_ONLY.into(),
        }
        .into())
    }

    fn remove_dir_all(&self, path: &Path) -> WebkitResult<()> {
        self.remove_file(path)
    }

    fn rename(&self, _from: &Path, to: &Path) -> WebkitResult<()> {
        Err(ApplicationError::Write {
            path: to.to_path_buf(),
            reason: READ_ONLY.into(),
        }
        .into())
    }

    fn walk(&self, dir: &Path) -> WebkitResult<Vec<PathBuf>> {
        self.inner.walk(dir)
    }
}
