//! Per-app `.dockerignore`.

use serde_json::json;

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::{Source, path};
use webkit_core::error::WebkitResult;

use super::{data, render};

pub const PRODUCER: Producer = Producer::new("docker_ignore", run);

fn run(ctx: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;

    for app in &def.apps {
        ctx.check()?;
        let dst = path::join(&app.path, ".dockerignore")?;
        render(
            input,
            ".dockerignore.tmpl",
            &dst,
            &json!({ "project": data::project_data(def), "app": data::app_data(app)? }),
            WriteOptions::new().with_tracking(Source::app(&app.name), "files::docker_ignore"),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::testing;

    #[test]
    fn one_file_per_app_attributed_to_the_app() {
        let (fs, manifest) = testing::run(&[PRODUCER], testing::SITE);

        let cms = manifest.get("apps/cms/.dockerignore").unwrap();
        assert_eq!(cms.source, Source::app("cms"));
        assert_eq!(manifest.len(), 3);

        let js = fs.read_to_string("apps/cms/.dockerignore").unwrap();
        assert!(js.contains("node_modules"));
        assert!(!js.contains("coverage.out"));

        let go = fs.read_to_string("services/api/.dockerignore").unwrap();
        assert!(go.contains("coverage.out"));
        assert!(!go.contains("node_modules"));
    }
}
