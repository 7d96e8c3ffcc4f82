//! File producers: everything `update`, `scaffold` and `drift` emit.
//!
//! Each producer is a plain function over the shared [`CommandInput`]. The
//! order of [`PRODUCERS`] is the order files are written.

mod backup;
mod code_style;
mod data;
mod docker;
mod git_settings;
mod migration_check;
mod package_json;
mod pr_workflow;
mod public_folder;
mod readme;
mod workspace;

use serde::Serialize;

use webkit_adapters::templates;
use webkit_core::application::{CommandInput, Pipeline, Producer, WriteOptions};
use webkit_core::error::WebkitResult;

pub use data::definition_data;

/// Every embedded template a producer may load. Checked at startup.
pub const TEMPLATES: [&str; 10] = [
    ".gitignore.tmpl",
    ".github/dependabot.yaml.tmpl",
    ".editorconfig.tmpl",
    ".prettierrc.tmpl",
    ".prettierignore.tmpl",
    "eslint.config.js.tmpl",
    ".dockerignore.tmpl",
    ".github/workflows/pr.yaml.tmpl",
    ".github/workflows/backup.yaml.tmpl",
    "README.md.tmpl",
];

pub const PRODUCERS: [Producer; 11] = [
    package_json::PRODUCER,
    workspace::PNPM_WORKSPACE,
    workspace::TURBO_JSON,
    git_settings::PRODUCER,
    code_style::PRODUCER,
    docker::PRODUCER,
    pr_workflow::PRODUCER,
    backup::PRODUCER,
    readme::PRODUCER,
    public_folder::PRODUCER,
    migration_check::PRODUCER,
];

/// The full update pipeline.
pub fn pipeline() -> Pipeline {
    Pipeline::new(PRODUCERS)
}

/// Render the embedded `template` into `dst`.
fn render<T: Serialize + ?Sized>(
    input: &CommandInput,
    template: &str,
    dst: &str,
    data: &T,
    opts: WriteOptions,
) -> WebkitResult<()> {
    let tpl = templates::load_or_fail(template);
    input.generator().write_template(dst, &*tpl, data, opts)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    //! Harness for running producers against an in-memory tree.

    use std::sync::Arc;

    use webkit_adapters::MemoryFilesystem;
    use webkit_core::application::{CommandInput, Pipeline, Producer, RunContext};
    use webkit_core::domain::{Definition, Manifest};

    pub fn definition(json: &str) -> Definition {
        serde_json::from_str(json).unwrap()
    }

    pub const SITE: &str = r#"{
        "project": {
            "name": "my-site",
            "title": "My Site",
            "description": "Marketing site",
            "repo": { "owner": "acme", "name": "my-site" }
        },
        "resources": [
            { "name": "db", "type": "postgres", "provider": "digitalocean" },
            { "name": "store", "type": "s3", "provider": "backblaze" }
        ],
        "apps": [
            { "name": "cms", "type": "payload-cms", "path": "./apps/cms" },
            { "name": "web", "type": "sveltekit", "path": "apps/web" },
            { "name": "api", "type": "go", "path": "services/api" }
        ]
    }"#;

    /// Run `producers` once and return the tree plus the saved manifest.
    pub fn run(producers: &[Producer], def: &str) -> (MemoryFilesystem, Manifest) {
        let fs = MemoryFilesystem::new();
        let input = CommandInput::builder(Arc::new(fs.clone()))
            .definition(definition(def))
            .build();
        Pipeline::new(producers.iter().copied())
            .run(&RunContext::new(), &input)
            .unwrap();
        let manifest = webkit_core::application::Tracker::load(&fs).unwrap();
        (fs, manifest)
    }
}
