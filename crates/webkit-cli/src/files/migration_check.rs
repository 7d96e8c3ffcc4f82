//! Dependency check run before Payload migrations.
//!
//! Written once per Payload app; the app owns it afterwards.

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::{AppKind, Source, path};
use webkit_core::error::WebkitResult;

pub const PRODUCER: Producer = Producer::new("migration_check", run);

/// Fails when `pnpm-lock.yaml` is newer than `node_modules`.
const CHECK_DEPS: &str = r#"const fs = require('fs');
const path = require('path');

try {
	const lockFile = path.join(__dirname, '..', 'pnpm-lock.yaml');
	const nodeModules = path.join(__dirname, '..', 'node_modules');

	if (!fs.existsSync(lockFile)) {
		console.error('❌ pnpm-lock.yaml not found');
		process.exit(1);
	}

	if (!fs.existsSync(nodeModules)) {
		console.error('❌ node_modules not found. Run: pnpm install');
		process.exit(1);
	}

	const lockStat = fs.statSync(lockFile);
	const nodeModulesStat = fs.statSync(nodeModules);

	if (lockStat.mtimeMs > nodeModulesStat.mtimeMs) {
		console.error('❌ Dependencies out of sync!');
		console.error('   pnpm-lock.yaml is newer than node_modules');
		console.error('   Run: pnpm install');
		process.exit(1);
	}

	console.log('✅ Dependencies are in sync');
} catch (err) {
	console.error('❌ Error checking dependencies:', err.message);
	process.exit(1);
}
"#;

fn run(ctx: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;

    for app in def.apps.iter().filter(|a| a.kind == AppKind::PayloadCms) {
        ctx.check()?;
        let dst = path::join(&app.path, "scripts/check-deps.js")?;
        input.generator().write_bytes(
            dst,
            CHECK_DEPS.as_bytes(),
            WriteOptions::new()
                .with_scaffold_mode()
                .with_tracking(Source::app(&app.name), "files::migration_check"),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::testing;

    #[test]
    fn script_for_payload_apps_only() {
        let (fs, manifest) = testing::run(&[PRODUCER], testing::SITE);

        let script = fs.read_to_string("apps/cms/scripts/check-deps.js").unwrap();
        assert!(script.starts_with("// Code generated by WebKit - DO NOT EDIT.\n\n"));
        assert!(script.contains("Dependencies out of sync"));
        assert_eq!(manifest.len(), 1);

        let entry = manifest.get("apps/cms/scripts/check-deps.js").unwrap();
        assert!(entry.scaffold_mode);
        assert_eq!(entry.source, Source::app("cms"));
        assert_eq!(entry.generator, "files::migration_check");
    }

    #[test]
    fn no_payload_apps_writes_nothing() {
        let (fs, manifest) = testing::run(
            &[PRODUCER],
            r#"{
                "project": { "name": "my-site" },
                "apps": [{ "name": "web", "type": "sveltekit", "path": "apps/web" }]
            }"#,
        );
        assert!(fs.list_files().iter().all(|p| !p.ends_with("check-deps.js")));
        assert!(manifest.is_empty());
    }
}
