//! WebKit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the WebKit
//! scaffolding engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           webkit-cli (CLI)              │
//! │   (commands, producers, printer)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, DriftService)        │
//! │   Pipeline → Generator → Tracker        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, Template, Printer, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     webkit-adapters (Infrastructure)    │
//! │ (LocalFilesystem, MemoryFilesystem,     │
//! │  Tera template registry)                │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Definition, Manifest, Source, Drift)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webkit_core::application::{Pipeline, RunContext, ScaffoldService};
//! use webkit_core::application::ports::{NoopNotifier, NoopPrinter};
//!
//! # fn run(fs: Arc<dyn webkit_core::application::Filesystem>, pipeline: Pipeline) {
//! let service = ScaffoldService::new(pipeline, fs, Arc::new(NoopPrinter), Arc::new(NoopNotifier));
//! let report = service.update(&RunContext::new(), false).unwrap();
//! println!("{} files tracked", report.tracked);
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandInput, DriftService, Generator, Pipeline, Producer, RunContext, ScaffoldService,
        Tracker, WriteOptions,
        ports::{EmbeddedAssets, Filesystem, Notifier, Printer, Template},
    };
    pub use crate::domain::{
        App, AppKind, Definition, DriftEntry, DriftReason, FileEntry, Manifest, Source,
    };
    pub use crate::error::{WebkitError, WebkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string recorded in manifests.
pub const VERSION_TAG: &str = concat!("v", env!("CARGO_PKG_VERSION"));
