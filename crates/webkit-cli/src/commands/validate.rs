//! `webkit validate`: check `app.json` against the project tree.

use tracing::instrument;

use webkit_core::application::{ports::Printer, validate_definition};

use crate::{
    commands::Project,
    error::{CliError, CliResult},
};

#[instrument(skip_all)]
pub fn execute(project: &Project) -> CliResult<()> {
    let output = &project.output;

    output.info("Validating app.json...");
    output.line_break();

    let errors = validate_definition(&project.fs)?;

    if output.is_json() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        output.json(&serde_json::json!({ "valid": errors.is_empty(), "errors": messages }))?;
    } else if errors.is_empty() {
        output.success("Validation passed! No errors found.");
    } else {
        output.error(&format!("Validation failed with {} error(s):", errors.len()));
        output.line_break();
        for (i, err) in errors.iter().enumerate() {
            output.println(&format!("  {}. {err}", i + 1));
        }
        output.line_break();
    }

    match errors.len() {
        0 => Ok(()),
        count => Err(CliError::ValidationFailed { count }),
    }
}
