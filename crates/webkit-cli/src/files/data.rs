//! Template data derived from the definition.
//!
//! Templates only ever see these shapes, never the raw `Definition`, so
//! derived values (canonical paths, default titles, language flags) are
//! computed once here.

use serde_json::{Value, json};

use webkit_core::domain::{App, AppKind, Definition, Resource, path};
use webkit_core::error::WebkitResult;

pub fn definition_data(def: &Definition) -> WebkitResult<Value> {
    let apps = def
        .apps
        .iter()
        .map(app_data)
        .collect::<WebkitResult<Vec<_>>>()?;

    Ok(json!({
        "project": project_data(def),
        "apps": apps,
        "resources": def.resources.iter().map(resource_data).collect::<Vec<_>>(),
        "contains_go": def.contains_go(),
        "contains_js": def.contains_js(),
        "contains_svelte": def.apps.iter().any(|a| a.kind == AppKind::SvelteKit),
        "uses_npm": def.uses_npm(),
    }))
}

pub fn project_data(def: &Definition) -> Value {
    let project = &def.project;
    let title = if project.title.is_empty() {
        &project.name
    } else {
        &project.title
    };
    json!({
        "name": project.name,
        "title": title,
        "description": project.description,
        "repo": project.repo.slug(),
    })
}

pub fn app_data(app: &App) -> WebkitResult<Value> {
    Ok(json!({
        "name": app.name,
        "kind": app.kind.as_str(),
        "language": app.kind.language(),
        "path": path::canonicalize(&app.path)?,
        "title": app.display_title(),
        "port": app.port(),
        "uses_npm": app.uses_npm(),
    }))
}

pub fn resource_data(resource: &Resource) -> Value {
    json!({
        "name": resource.name,
        "kind": resource.kind,
        "provider": resource.provider,
        "url_secret": format!("{}_DATABASE_URL", resource.name.to_uppercase().replace('-', "_")),
    })
}
