//! Keeps SvelteKit `static/` directories in git before any asset lands.

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::{AppKind, Source, path};
use webkit_core::error::WebkitResult;

pub const PRODUCER: Producer = Producer::new("public_folder", run);

fn run(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;

    for app in def.apps.iter().filter(|a| a.kind == AppKind::SvelteKit) {
        let dst = path::join(&app.path, "static/.gitkeep")?;
        input.generator().write_bytes(
            dst,
            &[],
            WriteOptions::new()
                .with_scaffold_mode()
                .with_tracking(Source::app(&app.name), "files::public_folder")
                .without_notice(),
        )?;
    }
    Ok(())
}
