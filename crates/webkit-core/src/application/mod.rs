//! Application layer for WebKit.
//!
//! This layer contains:
//! - **Engine**: the uniform file writer (`Generator`)
//! - **Tracker**: the manifest being built during a run
//! - **Drift**: three-way classification of on-disk changes
//! - **Pipeline**: ordered producers sharing a `CommandInput`
//! - **Services**: use case orchestration (update, scaffold, drift, validate)
//! - **Ports**: interface definitions (traits) for external dependencies
//!
//! Business rules live in `crate::domain`.

pub mod drift;
pub mod encode;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod services;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{Generator, NOTICE, Tracking, WriteMode, WriteOptions, WriteOutcome, notice_for};
pub use error::ApplicationError;
pub use pipeline::{CommandInput, CommandInputBuilder, Pipeline, Producer, ProducerFn, RunContext, load_definition};
pub use ports::{EmbeddedAssets, FileStat, Filesystem, Notifier, Printer, Template};
pub use services::{DriftService, RunReport, ScaffoldService, validate_definition};
pub use tracker::Tracker;
