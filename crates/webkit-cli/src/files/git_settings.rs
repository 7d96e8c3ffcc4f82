//! Git ignore rules, Dependabot and the repository settings file read by
//! the GitHub settings app.

use serde::Serialize;

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::{Definition, Source};
use webkit_core::error::WebkitResult;

use super::{definition_data, render};

pub const PRODUCER: Producer = Producer::new("git_settings", run);

const GENERATOR: &str = "files::git_settings";

const TEMPLATES: [(&str, &str); 2] = [
    (".gitignore.tmpl", ".gitignore"),
    (".github/dependabot.yaml.tmpl", ".github/dependabot.yaml"),
];

#[derive(Debug, Serialize)]
struct RepoSettings {
    repository: Repository,
    teams: Vec<Team>,
    branches: Vec<Branch>,
}

#[derive(Debug, Serialize)]
struct Repository {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    // The settings app rejects a list here.
    topics: String,
    private: bool,
    has_wiki: bool,
    has_downloads: bool,
    allow_merge_commit: bool,
    delete_branch_on_merge: bool,
}

#[derive(Debug, Serialize)]
struct Team {
    name: &'static str,
    permission: &'static str,
}

#[derive(Debug, Serialize)]
struct Branch {
    name: &'static str,
    protection: Protection,
}

#[derive(Debug, Serialize)]
struct Protection {
    enforce_admins: bool,
    allow_force_pushes: bool,
    allow_deletions: bool,
    restrictions: Restrictions,
}

#[derive(Debug, Serialize)]
struct Restrictions {
    teams: Vec<&'static str>,
    users: Vec<String>,
    apps: Vec<String>,
}

fn repo_settings(def: &Definition) -> RepoSettings {
    let repo = &def.project.repo;
    RepoSettings {
        repository: Repository {
            name: (!repo.name.is_empty()).then(|| repo.name.clone()),
            description: def.project.description.clone(),
            topics: def.github_labels().join(", "),
            private: true,
            has_wiki: false,
            has_downloads: false,
            allow_merge_commit: false,
            delete_branch_on_merge: true,
        },
        teams: vec![Team {
            name: "core",
            permission: "admin",
        }],
        branches: vec![Branch {
            name: "main",
            protection: Protection {
                enforce_admins: false,
                allow_force_pushes: false,
                allow_deletions: false,
                restrictions: Restrictions {
                    teams: vec!["core"],
                    users: Vec::new(),
                    apps: Vec::new(),
                },
            },
        }],
    }
}

fn run(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;
    let data = definition_data(def)?;

    for (template, dst) in TEMPLATES {
        render(
            input,
            template,
            dst,
            &data,
            WriteOptions::new().with_tracking(Source::project(), GENERATOR),
        )?;
    }

    input.generator().write_yaml(
        ".github/settings.yaml",
        &repo_settings(def),
        WriteOptions::new().with_tracking(Source::project(), GENERATOR),
    )?;
    Ok(())
}
