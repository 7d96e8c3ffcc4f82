//! Application services - orchestrate use cases.
//!
//! Services coordinate the pipeline, tracker and drift classifier to
//! implement `update`, `scaffold`, `drift` and `validate`.

pub mod drift_service;
pub mod orphans;
pub mod scaffold_service;
pub mod validation_service;

pub use drift_service::DriftService;
pub use orphans::{ORPHAN_CLEANUP, ORPHAN_REPORT, find_orphans};
pub use scaffold_service::{RunReport, ScaffoldService};
pub use validation_service::validate_definition;
