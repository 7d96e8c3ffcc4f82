//! `webkit drift`: compare the tree against a fresh in-memory generation.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use webkit_adapters::{MemoryFilesystem, ReadOnlyFilesystem};
use webkit_core::application::{DriftService, RunContext, ports::Printer};
use webkit_core::domain::{DriftEntry, DriftReason};

use crate::{
    commands::Project,
    error::{CliError, CliResult},
    files,
};

#[derive(Serialize)]
struct DriftReport<'a> {
    drift: &'a [DriftEntry],
}

#[instrument(skip_all, fields(root = %project.root.display()))]
pub fn execute(project: &Project) -> CliResult<()> {
    let output = &project.output;

    let spinner = output.spinner("Checking for drift...");
    let result = DriftService::new(files::pipeline()).detect(
        &RunContext::new(),
        Arc::new(ReadOnlyFilesystem::new(project.fs.clone())),
        Arc::new(MemoryFilesystem::new()),
    );
    spinner.finish_and_clear();
    let entries = result?;

    if output.is_json() {
        output.json(&DriftReport { drift: &entries })?;
    } else {
        render(&**output, &entries);
    }

    match entries.len() {
        0 => Ok(()),
        count => Err(CliError::DriftDetected { count }),
    }
}

fn render(printer: &dyn Printer, entries: &[DriftEntry]) {
    if entries.is_empty() {
        printer.success("No drift detected, files are up to date.");
        return;
    }

    printer.warn("Drift detected! The following files differ:");
    printer.line_break();

    let rows: Vec<Vec<String>> = DriftReason::ALL
        .iter()
        .flat_map(|reason| reason.filter(entries))
        .map(|e| {
            vec![
                e.path.clone(),
                e.reason.to_string(),
                e.source.to_string(),
                e.generator.clone(),
            ]
        })
        .collect();
    printer.table(&["PATH", "REASON", "SOURCE", "GENERATOR"], &rows);
    printer.line_break();
}
