//! Infrastructure adapters for WebKit.
//!
//! This crate implements the ports defined in `webkit-core::application::ports`:
//! filesystems (local disk, in-memory, read-only wrapper) and the embedded
//! Tera template bundle.

pub mod filesystem;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem, ReadOnlyFilesystem};
pub use templates::{EmbeddedBundle, TeraTemplate};
