//! Root `package.json`.

use std::collections::BTreeMap;

use serde::Serialize;

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::Source;
use webkit_core::error::WebkitResult;

pub const PRODUCER: Producer = Producer::new("package_json", run);

const GENERATOR: &str = "files::package_json";

/// Field order here is the order npm tooling writes them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    version: &'static str,
    license: &'static str,
    private: bool,
    #[serde(rename = "type")]
    kind: &'static str,
    scripts: BTreeMap<&'static str, &'static str>,
    dev_dependencies: BTreeMap<&'static str, &'static str>,
    package_manager: &'static str,
    author: Author,
}

#[derive(Debug, Serialize)]
struct Author {
    name: &'static str,
    email: &'static str,
    url: &'static str,
}

const SCRIPTS: [(&str, &str); 6] = [
    ("preinstall", "npx only-allow pnpm"),
    ("dev", "turbo dev"),
    ("test", "turbo test"),
    ("lint", "eslint ."),
    ("lint:fix", "eslint . --fix"),
    ("format", "prettier --write ."),
];

const DEV_DEPENDENCIES: [(&str, &str); 7] = [
    ("@eslint/compat", "^1.4.0"),
    ("eslint", "^9.37.0"),
    ("globals", "^16.0.0"),
    ("prettier", "^3.6.0"),
    ("prettier-plugin-svelte", "^3.4.0"),
    ("turbo", "^2.5.8"),
    ("typescript", "5.8.2"),
];

fn run(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;

    let manifest = PackageJson {
        name: &def.project.name,
        description: &def.project.description,
        version: "1.0.0",
        license: "BSD-3-Clause",
        private: true,
        kind: "module",
        scripts: SCRIPTS.into_iter().collect(),
        dev_dependencies: DEV_DEPENDENCIES.into_iter().collect(),
        package_manager: "pnpm@10.15.0",
        author: Author {
            name: "ainsley.dev LTD",
            email: "hello@ainsley.dev",
            url: "https://ainsley.dev",
        },
    };

    input.generator().write_json(
        "package.json",
        &manifest,
        WriteOptions::new().with_tracking(Source::project(), GENERATOR),
    )?;
    Ok(())
}
