//! Source tags: where a generated file conceptually comes from.
//!
//! Tags are opaque strings as far as the manifest and drift detector are
//! concerned. They are built through the constructors here so the namespace
//! stays `project`, `app:<name>` or `resource:<name>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

const PROJECT: &str = "project";
const APP_PREFIX: &str = "app:";
const RESOURCE_PREFIX: &str = "resource:";

/// A namespaced source identifier attached to every tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Source(String);

/// The parsed namespace of a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceScope<'a> {
    Project,
    App(&'a str),
    Resource(&'a str),
}

impl Source {
    /// The root-level definition.
    pub fn project() -> Self {
        Self(PROJECT.to_owned())
    }

    /// A specific app, by name.
    pub fn app(name: impl AsRef<str>) -> Self {
        Self(format!("{APP_PREFIX}{}", name.as_ref()))
    }

    /// A specific resource, by name.
    pub fn resource(name: impl AsRef<str>) -> Self {
        Self(format!("{RESOURCE_PREFIX}{}", name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scope(&self) -> SourceScope<'_> {
        if let Some(name) = self.0.strip_prefix(APP_PREFIX) {
            SourceScope::App(name)
        } else if let Some(name) = self.0.strip_prefix(RESOURCE_PREFIX) {
            SourceScope::Resource(name)
        } else {
            SourceScope::Project
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Source {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s == PROJECT
            || s
                .strip_prefix(APP_PREFIX)
                .or_else(|| s.strip_prefix(RESOURCE_PREFIX))
                .is_some_and(|name| !name.is_empty());

        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(DomainError::InvalidSourceTag { tag: s.to_owned() })
        }
    }
}

impl TryFrom<String> for Source {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        source.0
    }
}
