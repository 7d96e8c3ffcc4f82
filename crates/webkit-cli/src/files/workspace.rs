//! pnpm workspace and turborepo configuration.
//!
//! Both files are only written when at least one app is an npm package.

use serde::Serialize;
use serde_json::json;

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::{Source, path};
use webkit_core::error::WebkitResult;

pub const PNPM_WORKSPACE: Producer = Producer::new("pnpm_workspace", pnpm_workspace);
pub const TURBO_JSON: Producer = Producer::new("turbo_json", turbo_json);

#[derive(Debug, Serialize)]
struct PnpmWorkspace {
    packages: Vec<String>,
}

fn pnpm_workspace(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;
    if !def.uses_npm() {
        return Ok(());
    }

    let packages = def
        .npm_apps()
        .map(|app| path::canonicalize(&app.path))
        .collect::<Result<Vec<_>, _>>()?;

    input.generator().write_yaml(
        "pnpm-workspace.yaml",
        &PnpmWorkspace { packages },
        WriteOptions::new().with_tracking(Source::project(), "files::pnpm_workspace"),
    )?;
    Ok(())
}

fn turbo_json(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;
    if !def.uses_npm() {
        return Ok(());
    }

    let turbo = json!({
        "$schema": "https://turbo.build/schema.json",
        "ui": "tui",
        "tasks": {
            "build": {
                "dependsOn": ["^build"],
                "inputs": ["$TURBO_DEFAULT$", ".env*"],
                "outputs": ["dist/**", "build/**", ".svelte-kit/**", ".next/**", "!.next/cache/**"],
            },
            "dev": { "cache": false, "persistent": true },
            "lint": { "dependsOn": ["^lint"] },
            "test": { "dependsOn": ["^build"] },
        },
    });

    input.generator().write_json(
        "turbo.json",
        &turbo,
        WriteOptions::new().with_tracking(Source::project(), "files::turbo_json"),
    )?;
    Ok(())
}
