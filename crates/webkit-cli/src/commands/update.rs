//! `webkit update`: regenerate every file from `app.json`.

use tracing::instrument;

use webkit_core::application::{RunContext, ports::Printer};

use crate::{cli::UpdateArgs, commands::Project, error::CliResult};

#[instrument(skip_all, fields(prune = args.prune))]
pub fn execute(args: UpdateArgs, project: &Project) -> CliResult<()> {
    let output = &project.output;
    output.header("Updating project files");

    let report = project.service().update(&RunContext::new(), args.prune)?;

    if output.is_json() {
        output.json(&serde_json::json!({
            "tracked": report.tracked,
            "orphans": report.orphans,
            "pruned": report.pruned,
        }))?;
        return Ok(());
    }

    if !report.orphans.is_empty() {
        output.line_break();
        if report.pruned {
            output.info(&format!("Removed {} orphaned file(s):", report.orphans.len()));
        } else {
            output.warn(&format!(
                "{} generated file(s) are no longer produced by app.json:",
                report.orphans.len()
            ));
        }
        output.list(&report.orphans);
        if !report.pruned {
            output.println("Run 'webkit update --prune' to delete them.");
        }
    }

    output.line_break();
    output.success(&format!("{} file(s) tracked in the manifest", report.tracked));
    Ok(())
}
