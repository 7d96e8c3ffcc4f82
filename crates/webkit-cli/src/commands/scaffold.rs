//! `webkit scaffold`: create missing files, never overwrite.

use tracing::instrument;

use webkit_core::application::{RunContext, ports::Printer};

use crate::{cli::ScaffoldArgs, commands::Project, error::CliResult};

#[instrument(skip_all, fields(component = args.component.as_deref()))]
pub fn execute(args: ScaffoldArgs, project: &Project) -> CliResult<()> {
    let output = &project.output;
    match &args.component {
        Some(name) => output.header(&format!("Scaffolding {name}")),
        None => output.header("Scaffolding project files"),
    }

    let report = project
        .service()
        .scaffold(&RunContext::new(), args.component.as_deref())?;

    if output.is_json() {
        output.json(&serde_json::json!({ "tracked": report.tracked }))?;
        return Ok(());
    }

    output.line_break();
    output.success("Scaffold complete");
    Ok(())
}
