//! Local filesystem adapter using std::fs.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use webkit_core::{
    application::{
        ApplicationError,
        ports::{FileStat, Filesystem},
    },
    error::WebkitResult,
};

const DIR_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;

/// Production filesystem rooted at the project directory.
///
/// Every path passed in is joined onto `root`.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> WebkitResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder
            .create(self.resolve(path))
            .map_err(|e| mkdir_error(path, e))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> WebkitResult<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        let mut file = options
            .open(self.resolve(path))
            .map_err(|e| write_error(path, e))?;
        file.write_all(content).map_err(|e| write_error(path, e))
    }

    fn read_file(&self, path: &Path) -> WebkitResult<Vec<u8>> {
        fs::read(self.resolve(path)).map_err(|e| {
            ApplicationError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn stat(&self, path: &Path) -> WebkitResult<Option<FileStat>> {
        match fs::metadata(self.resolve(path)) {
            Ok(meta) => Ok(Some(FileStat {
                is_dir: meta.is_dir(),
                len: meta.len(),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApplicationError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn remove_file(&self, path: &Path) -> WebkitResult<()> {
        fs::remove_file(self.resolve(path)).map_err(|e| remove_error(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> WebkitResult<()> {
        fs::remove_dir_all(self.resolve(path)).map_err(|e| remove_error(path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> WebkitResult<()> {
        fs::rename(self.resolve(from), self.resolve(to)).map_err(|e| write_error(to, e))
    }

    fn walk(&self, dir: &Path) -> WebkitResult<Vec<PathBuf>> {
        let base = self.resolve(dir);
        let mut files = Vec::new();
        if !base.exists() {
            return Ok(files);
        }

        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::Read {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }
}

fn mkdir_error(path: &Path, e: io::Error) -> webkit_core::error::WebkitError {
    ApplicationError::Mkdir {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn write_error(path: &Path, e: io::Error) -> webkit_core::error::WebkitError {
    ApplicationError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn remove_error(path: &Path, e: io::Error) -> webkit_core::error::WebkitError {
    ApplicationError::Remove {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
