//! Scaffold Service - runs the file producers against the project tree.
//!
//! Two use cases share one pipeline:
//! 1. `update`: regenerate everything in place
//! 2. `scaffold`: create whatever is missing, never overwrite

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    VERSION_TAG,
    application::{
        ApplicationError,
        pipeline::{CommandInput, Pipeline, RunContext},
        ports::{Filesystem, Notifier, Printer},
        services::orphans::{ORPHAN_CLEANUP, ORPHAN_REPORT},
        tracker::Tracker,
    },
    domain::Manifest,
    error::WebkitResult,
};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Entries in the saved manifest.
    pub tracked: usize,
    /// Generated files no longer produced by the definition.
    pub orphans: Vec<String>,
    /// Whether `orphans` were deleted.
    pub pruned: bool,
}

/// Main generation service.
pub struct ScaffoldService {
    pipeline: Pipeline,
    fs: Arc<dyn Filesystem>,
    printer: Arc<dyn Printer>,
    notifier: Arc<dyn Notifier>,
}

impl ScaffoldService {
    pub fn new(
        pipeline: Pipeline,
        fs: Arc<dyn Filesystem>,
        printer: Arc<dyn Printer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pipeline,
            fs,
            printer,
            notifier,
        }
    }

    /// Regenerate every file. Scaffold-mode writes still skip existing files.
    ///
    /// Orphans are reported and kept in the manifest, or deleted when `prune`
    /// is set.
    #[instrument(skip_all, fields(prune = prune))]
    pub fn update(&self, ctx: &RunContext, prune: bool) -> WebkitResult<RunReport> {
        let previous = self.previous_manifest()?;
        let tracker = Arc::new(Tracker::new(VERSION_TAG));
        if let Some(prev) = &previous {
            tracker.carry_over_scaffolded(prev, self.fs.as_ref())?;
        }

        let pipeline = self
            .pipeline
            .clone()
            .then(if prune { ORPHAN_CLEANUP } else { ORPHAN_REPORT });

        let input = self.input(tracker.clone(), previous).build();
        pipeline.run(ctx, &input)?;

        let report = RunReport {
            tracked: tracker.len(),
            orphans: input.orphans(),
            pruned: prune,
        };
        info!(tracked = report.tracked, orphans = report.orphans.len(), "Update complete");
        Ok(report)
    }

    /// Create missing files only. `component` restricts the run to a single
    /// producer.
    #[instrument(skip_all, fields(component = component.unwrap_or("all")))]
    pub fn scaffold(&self, ctx: &RunContext, component: Option<&str>) -> WebkitResult<RunReport> {
        let pipeline = match component {
            None => self.pipeline.clone(),
            Some(name) => self.pipeline.only(name).ok_or_else(|| {
                ApplicationError::UnknownComponent {
                    name: name.to_owned(),
                    available: self.components().iter().map(|c| c.to_string()).collect(),
                }
            })?,
        };

        let previous = self.previous_manifest()?;
        let tracker = Arc::new(Tracker::new(VERSION_TAG));
        if let Some(prev) = &previous {
            tracker.carry_over_existing(prev, self.fs.as_ref())?;
        }

        let input = self.input(tracker.clone(), previous).scaffold_only().build();
        pipeline.run(ctx, &input)?;

        Ok(RunReport {
            tracked: tracker.len(),
            ..Default::default()
        })
    }

    /// Producer names, usable as `scaffold` components.
    pub fn components(&self) -> Vec<&'static str> {
        self.pipeline.names()
    }

    fn previous_manifest(&self) -> WebkitResult<Option<Manifest>> {
        match Tracker::load(self.fs.as_ref()) {
            Ok(m) => Ok(Some(m)),
            Err(e) if e.is_no_manifest() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn input(
        &self,
        tracker: Arc<Tracker>,
        previous: Option<Manifest>,
    ) -> crate::application::pipeline::CommandInputBuilder {
        CommandInput::builder(self.fs.clone())
            .tracker(tracker)
            .printer(self.printer.clone())
            .notifier(self.notifier.clone())
            .previous_manifest(previous)
    }
}
