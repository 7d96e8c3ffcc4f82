//! Pull request CI workflow.

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::Source;
use webkit_core::error::WebkitResult;

use super::{definition_data, render};

pub const PRODUCER: Producer = Producer::new("pr_workflow", run);

fn run(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let data = definition_data(input.definition()?)?;
    render(
        input,
        ".github/workflows/pr.yaml.tmpl",
        ".github/workflows/pr.yaml",
        &data,
        WriteOptions::new().with_tracking(Source::project(), "files::pr_workflow"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::testing;

    #[test]
    fn jobs_follow_app_languages() {
        let (fs, manifest) = testing::run(&[PRODUCER], testing::SITE);
        let yaml = fs.read_to_string(".github/workflows/pr.yaml").unwrap();

        assert!(yaml.starts_with("# Code generated by WebKit"));
        assert!(yaml.contains("GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}"));
        assert!(yaml.contains("TURBO_TEAM: ${{ vars.TURBO_TEAM }}"));
        assert!(yaml.contains("go-api:"));
        assert!(yaml.contains("working-directory: services/api"));
        assert!(manifest.contains(".github/workflows/pr.yaml"));
    }

    #[test]
    fn no_js_job_without_npm_apps() {
        let def = r#"{ "project": { "name": "svc" },
                       "apps": [{ "name": "api", "type": "go", "path": "api" }] }"#;
        let (fs, _) = testing::run(&[PRODUCER], def);
        let yaml = fs.read_to_string(".github/workflows/pr.yaml").unwrap();
        assert!(!yaml.contains("pnpm install"));
    }
}
