//! First-run scaffold followed by the drift cases a user can cause.

mod common;

use common::{Project, SITE, scaffolded};
use serde_json::{Value, json};

fn find<'a>(entries: &'a [Value], path: &str) -> &'a Value {
    entries
        .iter()
        .find(|e| e["path"] == path)
        .unwrap_or_else(|| panic!("no drift entry for {path}: {entries:?}"))
}

#[test]
fn scaffold_tracks_what_it_writes() {
    let project = scaffolded();
    let manifest = project.manifest();
    let files = manifest["files"].as_object().unwrap();

    for (path, entry) in files {
        assert!(project.file(path).is_file(), "{path} tracked but missing");
        assert_eq!(entry["path"], *path);
        assert_eq!(entry["hash"].as_str().unwrap().len(), 64);
    }

    assert_eq!(files["apps/cms/.dockerignore"]["source"], "app:cms");
    assert_eq!(files["package.json"]["source"], "project");
    assert_eq!(files["package.json"]["generator"], "files::package_json");
    assert!(!files.contains_key(".golangci.yaml"));

    let package: Value = serde_json::from_str(&project.read("package.json")).unwrap();
    assert_eq!(package["name"], "my-site");
    assert!(project.read(".webkit/manifest.json").contains("\n\t\"files\""));
}

#[test]
fn untouched_project_has_no_drift() {
    let project = scaffolded();
    assert!(project.drift(0).is_empty());
}

#[test]
fn user_edit_is_modified() {
    let project = scaffolded();
    project.write("apps/cms/.dockerignore", "user modified");

    let entries = project.drift(1);
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0],
        json!({
            "path": "apps/cms/.dockerignore",
            "reason": "modified",
            "source": "app:cms",
            "generator": "files::docker_ignore",
        })
    );
}

#[test]
fn definition_change_is_outdated() {
    let project = scaffolded();
    project.write("app.json", &SITE.replace("\"my-site\"", "\"renamed-site\""));

    let entries = project.drift(1);
    assert_eq!(entries.len(), 1, "{entries:?}");
    let entry = find(&entries, "package.json");
    assert_eq!(entry["reason"], "outdated");
    assert_eq!(entry["source"], "project");

    // Drift never writes.
    assert!(project.read("package.json").contains("\"my-site\""));
}

#[test]
fn removed_app_leaves_deleted_files() {
    let project = scaffolded();
    project.write("app.json", r#"{ "project": { "name": "my-site" } }"#);

    let entries = project.drift(1);
    let entry = find(&entries, "apps/cms/.dockerignore");
    assert_eq!(entry["reason"], "deleted");
    assert_eq!(entry["source"], "app:cms");
}

#[test]
fn deleted_file_is_new() {
    let project = scaffolded();
    std::fs::remove_file(project.file("package.json")).unwrap();

    let entries = project.drift(1);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["path"], "package.json");
    assert_eq!(entries[0]["reason"], "new");
    assert_eq!(entries[0]["source"], "project");
}

#[test]
fn drift_before_any_generation_is_not_found() {
    let project = Project::new(SITE);
    project
        .webkit()
        .arg("drift")
        .assert()
        .code(3)
        .stderr(predicates::str::contains("webkit update"));
}
