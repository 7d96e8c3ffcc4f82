//! Drift Service - regenerates the project into a scratch tree and compares.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    VERSION_TAG,
    application::{
        drift,
        pipeline::{CommandInput, Pipeline, RunContext, load_definition},
        ports::Filesystem,
        tracker::Tracker,
    },
    domain::DriftEntry,
    error::WebkitResult,
};

pub struct DriftService {
    pipeline: Pipeline,
}

impl DriftService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Run the pipeline into `expected` (an empty scratch filesystem) using
    /// the definition on `actual`, then classify the differences.
    ///
    /// Fails with the `NoManifest` sentinel when `actual` was never generated.
    #[instrument(skip_all)]
    pub fn detect(
        &self,
        ctx: &RunContext,
        actual: Arc<dyn Filesystem>,
        expected: Arc<dyn Filesystem>,
    ) -> WebkitResult<Vec<DriftEntry>> {
        let previous = Tracker::load(actual.as_ref())?;
        let definition = load_definition(actual.as_ref())?;

        let input = CommandInput::builder(expected.clone())
            .definition(definition)
            .tracker(Arc::new(Tracker::new(VERSION_TAG)))
            .build();
        self.pipeline.run(ctx, &input)?;

        let expected_manifest = Tracker::load(expected.as_ref())?;
        let entries = drift::classify(
            actual.as_ref(),
            expected.as_ref(),
            &previous,
            &expected_manifest,
        )?;

        info!(drifted = entries.len(), "Drift detection complete");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        engine::WriteOptions,
        pipeline::Producer,
        services::ScaffoldService,
        ports::{NoopNotifier, NoopPrinter},
        test_support::FakeFs,
    };
    use crate::domain::{DEFINITION_FILE, DriftReason, Source};

    fn name_file(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
        let def = input.definition()?;
        input.generator().write_json(
            "package.json",
            &serde_json::json!({ "name": def.project.name }),
            WriteOptions::new().with_tracking(Source::project(), "files::package_json"),
        )?;
        Ok(())
    }

    fn pipeline() -> Pipeline {
        Pipeline::new([Producer::new("package_json", name_file)])
    }

    fn generated_project() -> Arc<FakeFs> {
        let fs = Arc::new(FakeFs::new());
        fs.put(DEFINITION_FILE, r#"{ "project": { "name": "my-site" } }"#);
        ScaffoldService::new(pipeline(), fs.clone(), Arc::new(NoopPrinter), Arc::new(NoopNotifier))
            .update(&RunContext::new(), false)
            .unwrap();
        fs
    }

    #[test]
    fn fresh_project_has_no_drift() {
        let actual = generated_project();
        let drift = DriftService::new(pipeline())
            .detect(&RunContext::new(), actual, Arc::new(FakeFs::new()))
            .unwrap();
        assert!(drift.is_empty());
    }

    #[test]
    fn definition_change_is_outdated() {
        let actual = generated_project();
        actual.put(DEFINITION_FILE, r#"{ "project": { "name": "renamed" } }"#);

        let drift = DriftService::new(pipeline())
            .detect(&RunContext::new(), actual, Arc::new(FakeFs::new()))
            .unwrap();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].reason, DriftReason::Outdated);
        assert_eq!(drift[0].path, "package.json");
    }

    #[test]
    fn never_generated_is_no_manifest() {
        let actual = Arc::new(FakeFs::new());
        actual.put(DEFINITION_FILE, r#"{ "project": { "name": "x" } }"#);
        let err = DriftService::new(pipeline())
            .detect(&RunContext::new(), actual, Arc::new(FakeFs::new()))
            .unwrap_err();
        assert!(err.is_no_manifest());
    }

    #[test]
    fn actual_tree_is_not_touched() {
        let actual = generated_project();
        let before = actual.text(crate::domain::MANIFEST_PATH);
        DriftService::new(pipeline())
            .detect(&RunContext::new(), actual.clone(), Arc::new(FakeFs::new()))
            .unwrap();
        assert_eq!(actual.text(crate::domain::MANIFEST_PATH), before);
    }
}
