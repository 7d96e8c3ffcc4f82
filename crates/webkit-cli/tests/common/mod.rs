//! Shared fixtures for the end-to-end CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// One payload-cms app at `./apps/cms`.
pub const SITE: &str = r#"{
	"project": { "name": "my-site", "title": "My Site", "description": "A website" },
	"apps": [
		{ "name": "cms", "type": "payload-cms", "path": "./apps/cms" }
	]
}"#;

/// A temporary project directory with `app.json` in it.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new(definition: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("apps/cms")).unwrap();
        fs::write(dir.path().join("app.json"), definition).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.file(rel)).unwrap()
    }

    pub fn write(&self, rel: &str, content: &str) {
        fs::write(self.file(rel), content).unwrap();
    }

    pub fn manifest(&self) -> Value {
        serde_json::from_str(&self.read(".webkit/manifest.json")).unwrap()
    }

    /// `webkit` run inside the project, isolated from user config.
    pub fn webkit(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("webkit");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("WEBKIT_OUTPUT__FORMAT")
            .env_remove("WEBKIT_PROJECT__ROOT")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run `webkit drift --output-format json` and return the entries.
    pub fn drift(&self, expected_code: i32) -> Vec<Value> {
        let out = self
            .webkit()
            .args(["drift", "--output-format", "json"])
            .assert()
            .code(expected_code)
            .get_output()
            .stdout
            .clone();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        parsed["drift"].as_array().unwrap().clone()
    }
}

/// A project that has already been through `webkit scaffold`.
pub fn scaffolded() -> Project {
    let project = Project::new(SITE);
    project.webkit().arg("scaffold").assert().success();
    project
}
