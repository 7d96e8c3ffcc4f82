//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the engine, tracker or pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    #[error("Creating directory {path}: {reason}")]
    Mkdir { path: PathBuf, reason: String },

    #[error("Reading {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Writing {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Removing {path}: {reason}")]
    Remove { path: PathBuf, reason: String },

    /// JSON or YAML serialization failed.
    #[error("Encoding {format} for {path}: {reason}")]
    Encoding {
        path: PathBuf,
        format: &'static str,
        reason: String,
    },

    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("Rendering template {template}: {reason}")]
    TemplateRender { template: String, reason: String },

    /// Sentinel for a project that has never been generated.
    #[error("No manifest found at {path}")]
    NoManifest { path: PathBuf },

    #[error("Parsing manifest {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Project definition not found: {path}")]
    DefinitionMissing { path: PathBuf },

    #[error("Parsing project definition {path}: {reason}")]
    DefinitionParse { path: PathBuf, reason: String },

    #[error("Unknown component '{name}'")]
    UnknownComponent { name: String, available: Vec<String> },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Manifest tracker lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Whether this is the "never generated" sentinel.
    pub fn is_no_manifest(&self) -> bool {
        matches!(self, Self::NoManifest { .. })
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Mkdir { path, .. } | Self::Write { path, .. } | Self::Remove { path, .. } => vec![
                format!("Failed to modify: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Read { path, .. } => vec![format!(
                "Check that {} is readable",
                path.display()
            )],
            Self::TemplateNotFound { name } => vec![
                format!("'{}' is not part of the embedded template bundle", name),
                "This is a packaging bug, please report it".into(),
            ],
            Self::NoManifest { .. } => vec![
                "This project has not been generated yet".into(),
                "Run 'webkit update' or 'webkit scaffold' first".into(),
            ],
            Self::ManifestParse { path, .. } => vec![
                format!("{} is not valid JSON", path.display()),
                "Restore it from version control, or delete it and run 'webkit update'".into(),
            ],
            Self::DefinitionMissing { .. } => vec![
                "Run webkit from the project root or pass --dir".into(),
                "Create an app.json describing the project".into(),
            ],
            Self::DefinitionParse { .. } => vec![
                "Check app.json for syntax errors and unknown app types".into(),
            ],
            Self::UnknownComponent { available, .. } => vec![
                format!("Available components: {}", available.join(", ")),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoManifest { .. } | Self::DefinitionMissing { .. } => ErrorCategory::NotFound,
            Self::DefinitionParse { .. } | Self::UnknownComponent { .. } => {
                ErrorCategory::Validation
            }
            Self::ManifestParse { .. } => ErrorCategory::Configuration,
            Self::Mkdir { .. }
            | Self::Read { .. }
            | Self::Write { .. }
            | Self::Remove { .. }
            | Self::Encoding { .. }
            | Self::TemplateNotFound { .. }
            | Self::TemplateRender { .. }
            | Self::Cancelled
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
