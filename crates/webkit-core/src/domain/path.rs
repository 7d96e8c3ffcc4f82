//! Canonical manifest paths.
//!
//! Every path that enters the tracker goes through [`canonicalize`] so that
//! `./apps/cms/.dockerignore`, `apps/cms/.dockerignore` and
//! `apps\cms\.dockerignore` all land on the same manifest key.

use std::path::Path;

use crate::domain::error::DomainError;

/// Normalise `path` to the canonical manifest form.
///
/// Forward slashes, no leading `./`, no trailing slash, `.` segments dropped
/// and `..` resolved lexically. Absolute paths and paths that climb above the
/// project root are rejected.
pub fn canonicalize(path: impl AsRef<Path>) -> Result<String, DomainError> {
    let raw = path.as_ref().to_string_lossy().replace('\\', "/");

    if raw.starts_with('/') || has_drive_prefix(&raw) {
        return Err(DomainError::AbsolutePathNotAllowed { path: raw });
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    return Err(DomainError::PathEscapesRoot { path: raw.clone() });
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(DomainError::EmptyPath);
    }

    Ok(segments.join("/"))
}

/// `C:/...` style prefixes count as absolute even on unix hosts.
fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Join an app directory and a file name, then canonicalize.
pub fn join(dir: &str, file: &str) -> Result<String, DomainError> {
    canonicalize(format!("{dir}/{file}"))
}
