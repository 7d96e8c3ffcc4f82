//! Scheduled database backups, one workflow per postgres resource.

use serde_json::json;

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::Source;
use webkit_core::error::WebkitResult;

use super::{data, render};

pub const PRODUCER: Producer = Producer::new("backup_workflows", run);

fn run(ctx: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;

    for resource in def.resources.iter().filter(|r| r.is_postgres()) {
        ctx.check()?;
        render(
            input,
            ".github/workflows/backup.yaml.tmpl",
            &format!(".github/workflows/backup-{}.yaml", resource.name),
            &json!({
                "project": data::project_data(def),
                "resource": data::resource_data(resource),
            }),
            WriteOptions::new()
                .with_tracking(Source::resource(&resource.name), "files::backup_workflows"),
        )?;
    }
    Ok(())
}
