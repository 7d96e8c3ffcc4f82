//! The project definition (`app.json`).
//!
//! Read once per run and treated as immutable afterwards. Producers only ever
//! see it through a shared reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File name of the definition at the project root.
pub const DEFINITION_FILE: &str = "app.json";

/// The complete project definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub webkit_version: String,
    pub project: Project,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub apps: Vec<App>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repo: Repo,
}

/// GitHub coordinates of the project repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Repo {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub name: String,
}

impl Repo {
    /// `owner/name`, or `None` when either half is missing.
    pub fn slug(&self) -> Option<String> {
        if self.owner.is_empty() || self.name.is_empty() {
            None
        } else {
            Some(format!("{}/{}", self.owner, self.name))
        }
    }
}

// ── Apps ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AppKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "usesNPM", alias = "uses_npm", skip_serializing_if = "Option::is_none")]
    pub uses_npm: Option<bool>,
    #[serde(
        default,
        rename = "terraformManaged",
        alias = "terraform_managed",
        skip_serializing_if = "Option::is_none"
    )]
    pub terraform_managed: Option<bool>,
    #[serde(default)]
    pub build: Build,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Build {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Application flavour. Drives which producers apply to an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppKind {
    #[serde(rename = "payload-cms", alias = "payload")]
    PayloadCms,
    #[serde(rename = "sveltekit", alias = "svelte-kit")]
    SvelteKit,
    #[serde(rename = "go", alias = "golang")]
    Go,
}

impl AppKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayloadCms => "payload-cms",
            Self::SvelteKit => "sveltekit",
            Self::Go => "go",
        }
    }

    /// Language ecosystem: `js` or `go`.
    pub fn language(&self) -> &'static str {
        match self {
            Self::PayloadCms | Self::SvelteKit => "js",
            Self::Go => "go",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::PayloadCms => 3000,
            Self::SvelteKit => 3001,
            Self::Go => 8080,
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl App {
    /// Whether the app joins the pnpm workspace. Explicit setting wins,
    /// otherwise JS apps do and Go apps don't.
    pub fn uses_npm(&self) -> bool {
        self.uses_npm.unwrap_or(self.kind.language() == "js")
    }

    /// Defaults to `true` when unset.
    pub fn is_terraform_managed(&self) -> bool {
        self.terraform_managed.unwrap_or(true)
    }

    pub fn port(&self) -> u16 {
        self.build.port.unwrap_or_else(|| self.kind.default_port())
    }

    /// Display title, falling back to the name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

// ── Resources ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub provider: String,
}

impl Resource {
    pub fn is_postgres(&self) -> bool {
        self.kind == "postgres"
    }
}

// ── Queries ───────────────────────────────────────────────────────────────

impl Definition {
    pub fn app(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.name == name)
    }

    pub fn contains_go(&self) -> bool {
        self.apps.iter().any(|a| a.kind == AppKind::Go)
    }

    pub fn contains_js(&self) -> bool {
        self.apps.iter().any(|a| a.kind.language() == "js")
    }

    /// True when at least one app participates in the pnpm workspace.
    pub fn uses_npm(&self) -> bool {
        self.apps.iter().any(App::uses_npm)
    }

    pub fn npm_apps(&self) -> impl Iterator<Item = &App> {
        self.apps.iter().filter(|a| a.uses_npm())
    }

    /// Labels applied to the GitHub repository: `webkit` plus each app kind.
    pub fn github_labels(&self) -> Vec<String> {
        let mut labels = vec!["webkit".to_owned()];
        for app in &self.apps {
            let kind = app.kind.as_str().to_owned();
            if !labels.contains(&kind) {
                labels.push(kind);
            }
        }
        labels
    }
}
