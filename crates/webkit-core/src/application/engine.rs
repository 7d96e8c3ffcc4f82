//! The scaffolding engine.
//!
//! A uniform writer for raw bytes, templates, JSON, YAML and embedded files.
//! Every write goes through [`Generator::write_bytes`], which applies the
//! write mode, records the manifest entry and reports the outcome to the
//! [`Notifier`].

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{
    ApplicationError, encode,
    ports::{EmbeddedAssets, Filesystem, Notifier, Template},
    tracker::Tracker,
};
use crate::domain::{FileEntry, Source, hash_content, path};
use crate::error::WebkitResult;

/// Text of the notice banner, before comment wrapping.
pub const NOTICE: &str = "Code generated by WebKit - DO NOT EDIT.";

// ── Write options ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Always write, overwriting existing content.
    #[default]
    Generate,
    /// Create only if absent; user-owned afterwards.
    Scaffold,
}

/// Where a tracked file comes from and which producer wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracking {
    pub source: Source,
    pub generator: String,
}

/// Per-write settings, built with the `with_*` / `without_*` modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    mode: WriteMode,
    notice: bool,
    tracking: Option<Tracking>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            mode: WriteMode::Generate,
            notice: true,
            tracking: None,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scaffold_mode(mut self) -> Self {
        self.mode = WriteMode::Scaffold;
        self
    }

    pub fn with_tracking(mut self, source: Source, generator: impl Into<String>) -> Self {
        self.tracking = Some(Tracking {
            source,
            generator: generator.into(),
        });
        self
    }

    pub fn without_notice(mut self) -> Self {
        self.notice = false;
        self
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn notice(&self) -> bool {
        self.notice
    }

    pub fn tracking(&self) -> Option<&Tracking> {
        self.tracking.as_ref()
    }
}

/// What a single write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Skipped,
}

// ── Banner ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    Hash,
    Slash,
    Html,
}

fn comment_style(path: &str) -> Option<CommentStyle> {
    let name = path.rsplit('/').next().unwrap_or(path);
    if name == "Dockerfile" {
        return Some(CommentStyle::Hash);
    }

    let ext = name.rsplit_once('.').map(|(_, ext)| ext)?;
    match ext {
        "sh" | "bash" | "yaml" | "yml" | "toml" | "tf" | "hcl" | "env" | "dockerignore"
        | "gitignore" | "prettierignore" | "editorconfig" => Some(CommentStyle::Hash),
        "js" | "mjs" | "cjs" | "ts" | "mts" | "cts" | "jsx" | "tsx" | "go" => {
            Some(CommentStyle::Slash)
        }
        "html" | "htm" | "md" | "svelte" => Some(CommentStyle::Html),
        _ => None,
    }
}

/// The banner for `path`, including the trailing blank line, or `None` when
/// the file type has no comment syntax (JSON among them).
pub fn notice_for(path: &str) -> Option<String> {
    let line = match comment_style(path)? {
        CommentStyle::Hash => format!("# {NOTICE}"),
        CommentStyle::Slash => format!("// {NOTICE}"),
        CommentStyle::Html => format!("<!-- {NOTICE} -->"),
    };
    Some(format!("{line}\n\n"))
}

// ── Generator ─────────────────────────────────────────────────────────────

/// Writes files onto a [`Filesystem`] and records them in a [`Tracker`].
pub struct Generator {
    fs: Arc<dyn Filesystem>,
    tracker: Arc<Tracker>,
    notifier: Arc<dyn Notifier>,
    scaffold_only: bool,
}

impl Generator {
    pub fn new(fs: Arc<dyn Filesystem>, tracker: Arc<Tracker>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            fs,
            tracker,
            notifier,
            scaffold_only: false,
        }
    }

    /// Treat every write as create-if-absent. The recorded `scaffold_mode`
    /// flag still follows each write's declared mode.
    pub fn scaffold_only(mut self) -> Self {
        self.scaffold_only = true;
        self
    }

    pub fn fs(&self) -> &Arc<dyn Filesystem> {
        &self.fs
    }

    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.tracker
    }

    /// Write `data` to `path`, prefixed with the banner when the notice is on
    /// and the file type supports comments.
    pub fn write_bytes(
        &self,
        path: impl AsRef<Path>,
        data: &[u8],
        opts: WriteOptions,
    ) -> WebkitResult<WriteOutcome> {
        let canonical = path::canonicalize(path)?;
        if let Some(skipped) = self.skip_existing(&canonical, &opts) {
            return Ok(skipped);
        }
        let target = Path::new(&canonical);
        let exists = self.fs.exists(target);

        let bytes = match opts.notice.then(|| notice_for(&canonical)).flatten() {
            Some(banner) => [banner.as_bytes(), data].concat(),
            None => data.to_vec(),
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }

        if let Some(tracking) = opts.tracking {
            self.tracker.add(FileEntry {
                path: canonical.clone(),
                generator: tracking.generator,
                source: tracking.source,
                hash: hash_content(&bytes),
                scaffold_mode: opts.mode == WriteMode::Scaffold,
                generated_at: Utc::now(),
            })?;
        }

        self.fs.write_file(target, &bytes)?;
        debug!(path = %canonical, bytes = bytes.len(), "Wrote file");

        if exists {
            self.notifier.updated(&canonical);
            Ok(WriteOutcome::Updated)
        } else {
            self.notifier.created(&canonical);
            Ok(WriteOutcome::Created)
        }
    }

    /// Render `tpl` with `data` and write the result.
    pub fn write_template<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        tpl: &dyn Template,
        data: &T,
        opts: WriteOptions,
    ) -> WebkitResult<WriteOutcome> {
        let canonical = path::canonicalize(path)?;
        if let Some(skipped) = self.skip_existing(&canonical, &opts) {
            return Ok(skipped);
        }

        let value = serde_json::to_value(data).map_err(|e| ApplicationError::TemplateRender {
            template: tpl.name().to_owned(),
            reason: e.to_string(),
        })?;
        let rendered = tpl.render(&value)?;

        let mut out = String::new();
        if opts.notice {
            if let Some(banner) = notice_for(&canonical) {
                out.push_str(&banner);
            }
        }
        out.push_str(&rendered);

        self.write_bytes(&canonical, out.as_bytes(), opts.without_notice())
    }

    /// Tab-indented JSON with a trailing newline. Never carries a banner.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        opts: WriteOptions,
    ) -> WebkitResult<WriteOutcome> {
        let path = path.as_ref();
        let data = encode::json_tabs(value).map_err(|e| ApplicationError::Encoding {
            path: path.to_path_buf(),
            format: "json",
            reason: e.to_string(),
        })?;
        self.write_bytes(path, &data, opts.without_notice())
    }

    /// YAML with the banner on top unless disabled.
    pub fn write_yaml<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        opts: WriteOptions,
    ) -> WebkitResult<WriteOutcome> {
        let path = path.as_ref();
        let yaml = encode::yaml(value).map_err(|e| ApplicationError::Encoding {
            path: path.to_path_buf(),
            format: "yaml",
            reason: e.to_string(),
        })?;

        let mut out = String::new();
        if opts.notice {
            if let Some(banner) = notice_for(&path.to_string_lossy()) {
                out.push_str(&banner);
            }
        }
        out.push_str(&yaml);

        self.write_bytes(path, out.as_bytes(), opts.without_notice())
    }

    /// Byte-identical copy of an embedded file.
    pub fn copy_from_embed(
        &self,
        assets: &dyn EmbeddedAssets,
        src: &str,
        dst: impl AsRef<Path>,
        opts: WriteOptions,
    ) -> WebkitResult<WriteOutcome> {
        let data = assets
            .read(src)
            .ok_or_else(|| ApplicationError::TemplateNotFound { name: src.to_owned() })?;
        self.write_bytes(dst, data, opts.without_notice())
    }

    /// Delete a generated file and forget it. Returns whether a file was removed.
    pub fn remove(&self, path: impl AsRef<Path>) -> WebkitResult<bool> {
        let canonical = path::canonicalize(path)?;
        let target = Path::new(&canonical);

        let existed = self.fs.exists(target);
        if existed {
            self.fs.remove_file(target)?;
            self.notifier.removed(&canonical);
        }
        self.tracker.remove(&canonical)?;
        Ok(existed)
    }

    /// Scaffold-mode writes, and every write of a scaffold-only engine, leave
    /// an existing file alone.
    fn skip_existing(&self, canonical: &str, opts: &WriteOptions) -> Option<WriteOutcome> {
        let keep = opts.mode == WriteMode::Scaffold || self.scaffold_only;
        if !keep || !self.fs.exists(Path::new(canonical)) {
            return None;
        }
        debug!(path = %canonical, "Skipping existing file");
        self.notifier.skipped(canonical);
        Some(WriteOutcome::Skipped)
    }

    /// Persist the manifest. Called once after all writes.
    #[instrument(skip_all)]
    pub fn finalize(&self) -> WebkitResult<()> {
        self.tracker.save(self.fs.as_ref())
    }
}
