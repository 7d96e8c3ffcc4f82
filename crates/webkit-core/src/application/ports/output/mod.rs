//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `webkit-adapters` crate provides the filesystem and template
//! implementations; the CLI provides the printer.

mod printer;

pub use printer::{NoopNotifier, NoopPrinter, Notifier, Printer, PrinterNotifier};

use std::path::{Path, PathBuf};

use crate::error::WebkitResult;

/// Result of a `stat` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub len: u64,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `webkit_adapters::filesystem::LocalFilesystem` (real disk, rooted)
/// - `webkit_adapters::filesystem::MemoryFilesystem` (tests, expected tree)
/// - `webkit_adapters::filesystem::ReadOnlyFilesystem` (wrapper)
///
/// All paths are relative to the implementation's root. This is the only
/// way the engine and tracker touch storage.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> WebkitResult<()>;

    /// Create or truncate a file. The parent directory must exist.
    fn write_file(&self, path: &Path, content: &[u8]) -> WebkitResult<()>;

    fn read_file(&self, path: &Path) -> WebkitResult<Vec<u8>>;

    /// `None` when nothing exists at `path`.
    fn stat(&self, path: &Path) -> WebkitResult<Option<FileStat>>;

    fn exists(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> WebkitResult<()>;

    /// Move a file, replacing `to` if it exists. Atomic on local disk when
    /// both paths share a directory.
    fn rename(&self, from: &Path, to: &Path) -> WebkitResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> WebkitResult<()>;

    /// Every file below `dir`, relative to the filesystem root, sorted.
    fn walk(&self, dir: &Path) -> WebkitResult<Vec<PathBuf>>;

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.stat(path), Ok(Some(FileStat { is_dir: true, .. })))
    }
}

/// A parsed, ready-to-render template.
pub trait Template: Send + Sync {
    /// Name within the embedded bundle, used in error messages.
    fn name(&self) -> &str;

    fn render(&self, data: &serde_json::Value) -> WebkitResult<String>;
}

/// Raw files shipped inside the binary, served for byte-identical copies.
pub trait EmbeddedAssets: Send + Sync {
    fn read(&self, name: &str) -> Option<&'static [u8]>;
}
