//! CLI command implementations

pub mod controller;
pub mod migration;
pub mod model;
pub mod module;
pub mod stubs;

pub use controller::ControllerCommand;
pub use migration::MigrationCommand;
pub use model::{IncompleteCascade, ModelCommand};
pub use module::ModuleCommand;
pub use stubs::StubsCommand;

use console::{style, Emoji};
use hypervel_modules::scaffold::{GeneratedFile, LocalFilesystem, TemplateLibrary};
use hypervel_modules::ScaffoldConfig;
use std::path::Path;

pub(crate) static SUCCESS: Emoji = Emoji("✓ ", "√ ");
pub(crate) static WARNING: Emoji = Emoji("⚠ ", "! ");

/// Resolved configuration shared by every command
pub struct Workspace {
    /// Effective configuration, CLI overrides applied
    pub config: ScaffoldConfig,
    /// Stub library built from `config`
    pub templates: TemplateLibrary,
    /// Filesystem generators write to
    pub fs: LocalFilesystem,
}

impl Workspace {
    /// Build the workspace for `config`
    #[must_use]
    pub fn new(config: ScaffoldConfig) -> Self {
        let templates = config.template_library();
        Self {
            config,
            templates,
            fs: LocalFilesystem,
        }
    }

    /// `--namespace` if given, otherwise the configured namespace
    #[must_use]
    pub fn namespace(&self, flag: Option<&str>) -> String {
        flag.map_or_else(|| self.config.namespace.clone(), str::to_string)
    }
}

/// Print the status line for a written file
pub(crate) fn print_written(file: &GeneratedFile, path: &Path) {
    println!(
        "  {}{} ({})",
        style(SUCCESS).green(),
        style(path.display()).dim(),
        style(&file.description).dim()
    );
}

/// Describe what a failed run left behind, if anything
fn partial_summary(directories: usize, files: usize) -> Option<String> {
    (directories + files > 0).then(|| {
        format!(
            "{directories} director(ies) and {files} file(s) were created before the failure \
             and have been left in place"
        )
    })
}

/// Warn that a run stopped after creating some entries
pub(crate) fn print_partial(directories: usize, files: usize) {
    if let Some(summary) = partial_summary(directories, files) {
        eprintln!("{}{}", style(WARNING).yellow(), style(summary).yellow());
    }
}

pub(crate) fn print_autoload_hint() {
    println!(
        "\n{} {}",
        style("Don't forget to run:").bold(),
        style("composer dump-autoload").yellow()
    );
}
