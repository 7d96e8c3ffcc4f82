//! `webkit version`.

use webkit_core::application::ports::Printer;

use crate::{error::CliResult, output::OutputManager};

pub fn execute(output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&serde_json::json!({ "version": webkit_core::VERSION_TAG }))?;
    } else {
        output.println(&format!("webkit {}", webkit_core::VERSION_TAG));
    }
    Ok(())
}
