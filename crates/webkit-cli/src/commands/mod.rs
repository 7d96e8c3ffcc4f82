//! Command handlers. One module per subcommand.

pub mod completions;
pub mod config;
pub mod drift;
pub mod scaffold;
pub mod update;
pub mod validate;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use webkit_adapters::LocalFilesystem;
use webkit_core::application::ScaffoldService;
use webkit_core::application::ports::{Printer, PrinterNotifier};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    files,
    output::OutputManager,
};

/// The project directory a command operates on.
pub struct Project {
    pub root: PathBuf,
    pub fs: LocalFilesystem,
    pub output: Arc<OutputManager>,
}

impl Project {
    /// `-C/--dir` wins over `project.root` from the configuration.
    pub fn open(global: &GlobalArgs, config: &AppConfig, output: Arc<OutputManager>) -> CliResult<Self> {
        let root = global
            .dir
            .clone()
            .unwrap_or_else(|| config.project.root.clone());

        if !root.is_dir() {
            return Err(CliError::InvalidInput {
                message: format!("project directory {} does not exist", root.display()),
            });
        }

        debug!(root = %root.display(), "Opened project");
        Ok(Self {
            fs: LocalFilesystem::new(&root),
            root,
            output,
        })
    }

    pub fn printer(&self) -> Arc<dyn Printer> {
        self.output.clone()
    }

    /// Generation service over the project tree with the full producer set.
    pub fn service(&self) -> ScaffoldService {
        ScaffoldService::new(
            files::pipeline(),
            Arc::new(self.fs.clone()),
            self.printer(),
            Arc::new(PrinterNotifier::new(self.printer())),
        )
    }
}
