//! Embedded template bundle and Tera-backed registry.
//!
//! Every template ships inside the binary. Templates are parsed on first use
//! and cached for the life of the process; raw files (copied byte for byte)
//! are served through [`EmbeddedBundle`].

pub mod funcs;

use std::{
    collections::HashMap,
    error::Error as _,
    sync::{Arc, OnceLock, RwLock},
};

use tera::{Context, Tera};
use tracing::{debug, instrument};

use webkit_core::{
    application::{
        ApplicationError,
        ports::{EmbeddedAssets, Template},
    },
    error::WebkitResult,
};

// ── Bundle ────────────────────────────────────────────────────────────────────

macro_rules! bundle {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../../templates/", $name)))),*]
    };
}

/// Renderable templates, keyed by their path inside `templates/`.
static TEMPLATES: &[(&str, &str)] = bundle![
    ".dockerignore.tmpl",
    ".editorconfig.tmpl",
    ".github/dependabot.yaml.tmpl",
    ".github/workflows/backup.yaml.tmpl",
    ".github/workflows/pr.yaml.tmpl",
    ".gitignore.tmpl",
    ".prettierignore.tmpl",
    ".prettierrc.tmpl",
    "README.md.tmpl",
    "eslint.config.js.tmpl",
];

/// Files copied verbatim.
static RAW: &[(&str, &str)] = bundle![".golangci.yaml"];

/// Names of every renderable template in the bundle.
pub fn names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|(name, _)| *name).collect()
}

fn source(name: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, src)| *src)
}

/// Raw bundle access for `Generator::copy_from_embed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBundle;

impl EmbeddedAssets for EmbeddedBundle {
    fn read(&self, name: &str) -> Option<&'static [u8]> {
        RAW.iter()
            .chain(TEMPLATES.iter())
            .find(|(n, _)| *n == name)
            .map(|(_, src)| src.as_bytes())
    }
}

// ── Templates ─────────────────────────────────────────────────────────────────

/// One parsed template with the helper functions registered.
pub struct TeraTemplate {
    name: String,
    tera: Tera,
}

impl TeraTemplate {
    /// Parse `source` under `name`.
    pub fn parse(name: &str, source: &str) -> WebkitResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        funcs::register(&mut tera);
        tera.add_raw_template(name, source)
            .map_err(|e| render_error(name, &e))?;

        Ok(Self {
            name: name.to_owned(),
            tera,
        })
    }
}

impl std::fmt::Debug for TeraTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeraTemplate").field("name", &self.name).finish()
    }
}

impl Template for TeraTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, data: &serde_json::Value) -> WebkitResult<String> {
        let context =
            Context::from_value(data.clone()).map_err(|e| render_error(&self.name, &e))?;
        self.tera
            .render(&self.name, &context)
            .map_err(|e| render_error(&self.name, &e))
    }
}

/// Tera nests the useful message in the source chain.
fn render_error(name: &str, err: &tera::Error) -> webkit_core::error::WebkitError {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }

    ApplicationError::TemplateRender {
        template: name.to_owned(),
        reason,
    }
    .into()
}

// ── Registry ──────────────────────────────────────────────────────────────────

type Cache = RwLock<HashMap<&'static str, Arc<TeraTemplate>>>;

fn cache() -> &'static Cache {
    static CACHE: OnceLock<Cache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Fetch a template by name, parsing it on first use.
#[instrument(level = "debug")]
pub fn load(name: &str) -> WebkitResult<Arc<TeraTemplate>> {
    if let Some(hit) = cache().read().ok().and_then(|c| c.get(name).cloned()) {
        return Ok(hit);
    }

    let (key, src) = TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .copied()
        .ok_or_else(|| ApplicationError::TemplateNotFound {
            name: name.to_owned(),
        })?;

    let parsed = Arc::new(TeraTemplate::parse(key, src)?);
    debug!(template = key, "parsed template");

    let mut guard = cache()
        .write()
        .map_err(|_| ApplicationError::LockPoisoned)?;
    Ok(guard.entry(key).or_insert(parsed).clone())
}

/// Like [`load`], for names known to be in the bundle.
///
/// # Panics
///
/// If `name` is missing or fails to parse. [`validate_embedded`] runs at
/// startup so this can only fire on a packaging bug.
pub fn load_or_fail(name: &str) -> Arc<TeraTemplate> {
    match load(name) {
        Ok(template) => template,
        Err(e) => panic!("embedded template {name}: {e}"),
    }
}

/// Check that each name exists and parses.
#[instrument(skip_all, fields(count = names.len()))]
pub fn validate_embedded(names: &[&str]) -> WebkitResult<()> {
    for name in names {
        if source(name).is_none() {
            return Err(ApplicationError::TemplateNotFound {
                name: (*name).to_owned(),
            }
            .into());
        }
        load(name)?;
    }
    Ok(())
}
