use std::collections::HashSet;

use crate::domain::{definition::Definition, error::DomainError, path};

/// Centralized definition validation.
///
/// Every rule runs; errors are collected rather than returned on first
/// failure so `webkit validate` can show the full list at once.
pub struct DefinitionValidator;

impl DefinitionValidator {
    /// Validate `def`. `dir_exists` answers whether a canonical,
    /// root-relative directory is present on the target filesystem.
    pub fn validate(def: &Definition, dir_exists: impl Fn(&str) -> bool) -> Result<(), DomainError> {
        let errors = Self::collect(def, dir_exists);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidDefinition(errors))
        }
    }

    /// All violations, in a stable order: project, apps, resources.
    pub fn collect(def: &Definition, dir_exists: impl Fn(&str) -> bool) -> Vec<DomainError> {
        let mut errors = Vec::new();

        if def.project.name.trim().is_empty() {
            errors.push(DomainError::MissingRequiredField {
                field: "project.name".into(),
            });
        }

        let mut app_names = HashSet::new();
        for (i, app) in def.apps.iter().enumerate() {
            check_name(&mut errors, &format!("apps[{i}].name"), &app.name);
            if !app.name.is_empty() && !app_names.insert(app.name.as_str()) {
                errors.push(DomainError::DuplicateApp {
                    name: app.name.clone(),
                });
            }

            if app.path.trim().is_empty() {
                errors.push(DomainError::MissingRequiredField {
                    field: format!("apps[{i}].path"),
                });
                continue;
            }

            match path::canonicalize(&app.path) {
                Ok(canonical) if !dir_exists(&canonical) => {
                    errors.push(DomainError::AppPathMissing {
                        app: app.name.clone(),
                        path: app.path.clone(),
                    });
                }
                Ok(_) => {}
                Err(e) => errors.push(DomainError::InvalidAppPath {
                    app: app.name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        let mut resource_names = HashSet::new();
        for (i, res) in def.resources.iter().enumerate() {
            check_name(&mut errors, &format!("resources[{i}].name"), &res.name);
            if !res.name.is_empty() && !resource_names.insert(res.name.as_str()) {
                errors.push(DomainError::DuplicateResource {
                    name: res.name.clone(),
                });
            }
            if res.kind.trim().is_empty() {
                errors.push(DomainError::MissingRequiredField {
                    field: format!("resources[{i}].type"),
                });
            }
        }

        errors
    }
}

fn check_name(errors: &mut Vec<DomainError>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(DomainError::MissingRequiredField {
            field: field.to_owned(),
        });
    } else if !is_slug(value) {
        errors.push(DomainError::InvalidName {
            field: field.to_owned(),
            value: value.to_owned(),
        });
    }
}

/// `^[a-z][a-z0-9-]*$`
fn is_slug(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
