//! Core domain layer for WebKit.
//!
//! Pure logic only: the project definition, the manifest model, source tags,
//! drift classification types, content hashing and path rules. All I/O goes
//! through the ports in [`crate::application::ports`].

pub mod definition;
pub mod drift;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod path;
pub mod source;

mod validation;

pub use definition::{App, AppKind, Build, DEFINITION_FILE, Definition, Project, Repo, Resource};
pub use drift::{DriftEntry, DriftReason};
pub use error::{DomainError, ErrorCategory};
pub use hash::hash_content;
pub use manifest::{FileEntry, MANIFEST_PATH, Manifest};
pub use source::{Source, SourceScope};
pub use validation::DefinitionValidator;
