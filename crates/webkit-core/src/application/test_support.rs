//! In-crate fakes for unit tests.
//!
//! `webkit-adapters` implements the ports of the non-test build of this
//! crate, so its filesystems are only usable from `tests/`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::{
    ApplicationError,
    ports::{FileStat, Filesystem, Notifier, Template},
};
use crate::error::WebkitResult;

#[derive(Default)]
pub struct FakeFs {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parents.
    pub fn put(&self, path: &str, content: impl AsRef<[u8]>) {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.write_file(path, content.as_ref()).unwrap();
    }

    pub fn text(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(Path::new(path))
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.lock().unwrap().contains(Path::new(path))
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, path: &Path) -> WebkitResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> WebkitResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.dirs.lock().unwrap().contains(parent) {
                return Err(ApplicationError::Write {
                    path: path.to_path_buf(),
                    reason: "parent directory does not exist".into(),
                }
                .into());
            }
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> WebkitResult<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::Read {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn stat(&self, path: &Path) -> WebkitResult<Option<FileStat>> {
        if let Some(data) = self.files.lock().unwrap().get(path) {
            return Ok(Some(FileStat {
                is_dir: false,
                len: data.len() as u64,
            }));
        }
        Ok(self
            .dirs
            .lock()
            .unwrap()
            .contains(path)
            .then_some(FileStat { is_dir: true, len: 0 }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn remove_file(&self, path: &Path) -> WebkitResult<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| {
                ApplicationError::Remove {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn rename(&self, from: &Path, to: &Path) -> WebkitResult<()> {
        let content = self.files.lock().unwrap().remove(from).ok_or_else(|| {
            ApplicationError::Write {
                path: to.to_path_buf(),
                reason: "source not found".into(),
            }
        })?;
        self.write_file(to, &content)
    }

    fn remove_dir_all(&self, path: &Path) -> WebkitResult<()> {
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn walk(&self, dir: &Path) -> WebkitResult<Vec<PathBuf>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect())
    }
}

/// Records every notification as `kind:path`.
#[derive(Default)]
pub struct RecordingNotifier(pub Mutex<Vec<String>>);

impl RecordingNotifier {
    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn created(&self, path: &str) {
        self.0.lock().unwrap().push(format!("created:{path}"));
    }
    fn updated(&self, path: &str) {
        self.0.lock().unwrap().push(format!("updated:{path}"));
    }
    fn skipped(&self, path: &str) {
        self.0.lock().unwrap().push(format!("skipped:{path}"));
    }
    fn removed(&self, path: &str) {
        self.0.lock().unwrap().push(format!("removed:{path}"));
    }
}

/// Replaces `{{name}}` with `data["name"]`.
pub struct FakeTemplate(pub &'static str);

impl Template for FakeTemplate {
    fn name(&self) -> &str {
        "fake.tmpl"
    }

    fn render(&self, data: &serde_json::Value) -> WebkitResult<String> {
        let name = data
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ApplicationError::TemplateRender {
                template: "fake.tmpl".into(),
                reason: "missing name".into(),
            })?;
        Ok(self.0.replace("{{name}}", name))
    }
}
