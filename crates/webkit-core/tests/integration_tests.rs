//! End-to-end runs through the public API: update, drift, prune.

use std::path::Path;
use std::sync::Arc;

use webkit_adapters::MemoryFilesystem;
use webkit_core::application::ports::{Filesystem, NoopNotifier, NoopPrinter};
use webkit_core::application::{
    ApplicationError, CommandInput, DriftService, Pipeline, Producer, RunContext, ScaffoldService,
    WriteOptions,
};
use webkit_core::domain::{DEFINITION_FILE, DriftReason, MANIFEST_PATH, Source, path};
use webkit_core::error::{WebkitError, WebkitResult};

fn with_definition(json: &str) -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.insert(DEFINITION_FILE, json).unwrap();
    fs
}

const SITE: &str = r#"{
    "project": { "name": "my-site" },
    "apps": [
        { "name": "cms", "type": "payload-cms", "path": "./apps/cms" },
        { "name": "web", "type": "sveltekit", "path": "apps/web" }
    ]
}"#;

fn project_name(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let name = &input.definition()?.project.name;
    input.generator().write_bytes(
        "name.txt",
        format!("{name}\n").as_bytes(),
        WriteOptions::new().with_tracking(Source::project(), "test::name"),
    )?;
    Ok(())
}

fn per_app(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    for app in &input.definition()?.apps {
        input.generator().write_yaml(
            path::join(&app.path, "app.yaml")?,
            &serde_json::json!({ "name": app.name, "kind": app.kind.as_str() }),
            WriteOptions::new().with_tracking(Source::app(&app.name), "test::per_app"),
        )?;
    }
    Ok(())
}

fn pipeline() -> Pipeline {
    Pipeline::new([
        Producer::new("name", project_name),
        Producer::new("per_app", per_app),
    ])
}

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(
        pipeline(),
        Arc::new(fs.clone()),
        Arc::new(NoopPrinter),
        Arc::new(NoopNotifier),
    )
}

fn drift(fs: &MemoryFilesystem) -> Vec<(String, DriftReason)> {
    DriftService::new(pipeline())
        .detect(
            &RunContext::new(),
            Arc::new(fs.clone()),
            Arc::new(MemoryFilesystem::new()),
        )
        .unwrap()
        .into_iter()
        .map(|e| (e.path, e.reason))
        .collect()
}

#[test]
fn update_then_drift_is_clean() {
    let fs = with_definition(SITE);
    let report = service(&fs).update(&RunContext::new(), false).unwrap();

    assert_eq!(report.tracked, 3);
    assert!(fs.read_to_string(MANIFEST_PATH).is_some());
    assert!(fs.read_to_string("apps/web/app.yaml").unwrap().starts_with("# Code generated by WebKit"));
    assert!(drift(&fs).is_empty());
}

#[test]
fn every_drift_reason_in_one_run() {
    let fs = with_definition(SITE);
    service(&fs).update(&RunContext::new(), false).unwrap();

    fs.insert("apps/cms/app.yaml", "edited\n").unwrap();
    fs.remove_file(Path::new("name.txt")).unwrap();
    fs.insert(
        DEFINITION_FILE,
        r#"{ "project": { "name": "my-site" },
             "apps": [{ "name": "cms", "type": "payload-cms", "path": "apps/cms" }] }"#,
    )
    .unwrap();

    let mut found = drift(&fs);
    found.sort();
    assert_eq!(
        found,
        vec![
            ("apps/cms/app.yaml".to_owned(), DriftReason::Modified),
            ("apps/web/app.yaml".to_owned(), DriftReason::Deleted),
            ("name.txt".to_owned(), DriftReason::New),
        ]
    );
}

#[test]
fn prune_removes_orphans_and_forgets_them() {
    let fs = with_definition(SITE);
    service(&fs).update(&RunContext::new(), false).unwrap();
    fs.insert(
        DEFINITION_FILE,
        r#"{ "project": { "name": "my-site" },
             "apps": [{ "name": "cms", "type": "payload-cms", "path": "apps/cms" }] }"#,
    )
    .unwrap();

    let kept = service(&fs).update(&RunContext::new(), false).unwrap();
    assert_eq!(kept.orphans, vec!["apps/web/app.yaml"]);
    assert!(!kept.pruned);
    assert!(fs.read_to_string("apps/web/app.yaml").is_some());

    let pruned = service(&fs).update(&RunContext::new(), true).unwrap();
    assert!(pruned.pruned);
    assert_eq!(pruned.tracked, 2);
    assert!(fs.read_to_string("apps/web/app.yaml").is_none());
    assert!(!fs.read_to_string(MANIFEST_PATH).unwrap().contains("apps/web"));
}

#[test]
fn cancelled_run_never_writes_manifest() {
    fn cancel(ctx: &RunContext, _: &CommandInput) -> WebkitResult<()> {
        ctx.cancel();
        Ok(())
    }

    let fs = with_definition(SITE);
    let service = ScaffoldService::new(
        Pipeline::new([Producer::new("cancel", cancel)]).then(Producer::new("name", project_name)),
        Arc::new(fs.clone()),
        Arc::new(NoopPrinter),
        Arc::new(NoopNotifier),
    );

    let err = service.update(&RunContext::new(), false).unwrap_err();
    assert!(matches!(
        err,
        WebkitError::Application(ApplicationError::Cancelled)
    ));
    assert!(fs.read_to_string("name.txt").is_none());
    assert!(fs.read_to_string(MANIFEST_PATH).is_none());
}
