//! Validation Service - checks `app.json` against the target tree.

use std::path::Path;

use crate::{
    application::{pipeline::load_definition, ports::Filesystem},
    domain::{DefinitionValidator, DomainError},
    error::WebkitResult,
};

/// Parse the definition on `fs` and collect every rule violation.
///
/// Read and parse failures are errors; rule violations are returned as the
/// list (empty when the definition is valid).
pub fn validate_definition(fs: &dyn Filesystem) -> WebkitResult<Vec<DomainError>> {
    let definition = load_definition(fs)?;
    Ok(DefinitionValidator::collect(&definition, |dir| {
        fs.is_dir(Path::new(dir))
    }))
}
