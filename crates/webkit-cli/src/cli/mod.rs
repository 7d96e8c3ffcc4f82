//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "webkit",
    bin_name = "webkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate and track project files from app.json",
    long_about = "WebKit materializes CI workflows, linter configs, package manifests \
                  and ignore files from a declarative app.json, records what it wrote \
                  in .webkit/manifest.json, and reports drift when files diverge.",
    after_help = "EXAMPLES:\n\
        \x20 webkit scaffold\n\
        \x20 webkit update --prune\n\
        \x20 webkit drift --output-format json\n\
        \x20 webkit -C ./site validate",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report files that differ from what app.json would produce.
    #[command(
        about = "Detect drift between generated files and app.json",
        after_help = "Exits with status 1 when drift is found.\n\n\
            EXAMPLES:\n\
            \x20 webkit drift\n\
            \x20 webkit drift --output-format json"
    )]
    Drift,

    /// Regenerate every file from app.json.
    #[command(
        visible_alias = "up",
        about = "Regenerate all files from app.json",
        after_help = "EXAMPLES:\n\
            \x20 webkit update\n\
            \x20 webkit update --prune"
    )]
    Update(UpdateArgs),

    /// Create missing files without touching existing ones.
    #[command(
        about = "Initialise project files without overwriting",
        after_help = "EXAMPLES:\n\
            \x20 webkit scaffold\n\
            \x20 webkit scaffold readme"
    )]
    Scaffold(ScaffoldArgs),

    /// Check app.json against the project tree.
    #[command(about = "Validate app.json")]
    Validate,

    /// Print the tool version.
    #[command(about = "Print version information")]
    Version,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 webkit completions bash > ~/.local/share/bash-completion/completions/webkit\n\
            \x20 webkit completions zsh  > ~/.zfunc/_webkit\n\
            \x20 webkit completions fish > ~/.config/fish/completions/webkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the CLI configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 webkit config get output.format\n\
            \x20 webkit config list\n\
            \x20 webkit config path"
    )]
    Config(ConfigCommands),
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `webkit update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Delete generated files the definition no longer produces.
    #[arg(long = "prune", help = "Delete orphaned generated files")]
    pub prune: bool,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `webkit scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Producer to run on its own, e.g. `readme` or `docker_ignore`.
    #[arg(value_name = "COMPONENT", help = "Only run this component")]
    pub component: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `webkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `webkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
