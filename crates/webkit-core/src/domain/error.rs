// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so validation results can be collected and re-reported)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Path rules
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Path is empty")]
    EmptyPath,

    // ========================================================================
    // Source tags
    // ========================================================================
    #[error("Invalid source tag '{tag}': expected project, app:<name> or resource:<name>")]
    InvalidSourceTag { tag: String },

    // ========================================================================
    // Definition validation
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: String },

    #[error("{field}: '{value}' must start with a lowercase letter and contain only a-z, 0-9 or '-'")]
    InvalidName { field: String, value: String },

    #[error("Duplicate app name: {name}")]
    DuplicateApp { name: String },

    #[error("Duplicate resource name: {name}")]
    DuplicateResource { name: String },

    #[error("App '{app}' path does not exist: {path}")]
    AppPathMissing { app: String, path: String },

    #[error("App '{app}' path is invalid: {reason}")]
    InvalidAppPath { app: String, reason: String },

    #[error("Definition is invalid ({} error(s))", .0.len())]
    InvalidDefinition(Vec<DomainError>),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{}' must be relative to the project root", path),
                "Use paths such as ./apps/web or apps/web".into(),
            ],
            Self::PathEscapesRoot { path } => vec![
                format!("'{}' points outside the project", path),
                "Remove '..' segments that climb above the project root".into(),
            ],
            Self::InvalidSourceTag { .. } => vec![
                "Source tags are project, app:<name> or resource:<name>".into(),
                "The manifest may have been edited by hand; run 'webkit update'".into(),
            ],
            Self::DuplicateApp { name } => vec![
                format!("Two apps are named '{}' in app.json", name),
                "App names must be unique".into(),
            ],
            Self::DuplicateResource { name } => vec![
                format!("Two resources are named '{}' in app.json", name),
                "Resource names must be unique".into(),
            ],
            Self::InvalidName { value, .. } => vec![
                format!("Rename '{}' to something like 'my-app'", value),
            ],
            Self::AppPathMissing { path, .. } => vec![
                format!("Create the directory '{}' or fix the app path", path),
            ],
            Self::InvalidDefinition(errors) => errors.iter().map(|e| e.to_string()).collect(),
            _ => vec!["Check app.json against the documented schema".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDefinition(_)
            | Self::MissingRequiredField { .. }
            | Self::InvalidName { .. }
            | Self::DuplicateApp { .. }
            | Self::DuplicateResource { .. }
            | Self::AppPathMissing { .. }
            | Self::InvalidAppPath { .. } => ErrorCategory::Validation,
            Self::AbsolutePathNotAllowed { .. } | Self::PathEscapesRoot { .. } | Self::EmptyPath => {
                ErrorCategory::Validation
            }
            Self::InvalidSourceTag { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
