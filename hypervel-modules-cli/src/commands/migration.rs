//! `make-module-migration` command

use anyhow::Result;
use console::style;
use hypervel_modules::scaffold::{
    MigrationGenerator, MigrationOptions, MigrationTable, ScaffoldContext, WriteEvent,
};

use super::{print_written, Workspace};

/// Create a migration inside an existing module
pub struct MigrationCommand {
    module: String,
    name: String,
    table: MigrationTable,
    namespace: Option<String>,
}

impl MigrationCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(
        module: String,
        name: String,
        table: MigrationTable,
        namespace: Option<String>,
    ) -> Self {
        Self {
            module,
            name,
            table,
            namespace,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the module does not exist, a stub is missing, or
    /// the file cannot be written.
    pub fn execute(&self, workspace: &Workspace) -> Result<()> {
        let generator = MigrationGenerator::new(MigrationOptions {
            module: self.module.clone(),
            name: self.name.clone(),
            table: self.table.clone(),
            namespace: workspace.namespace(self.namespace.as_deref()),
            created_at: chrono::Local::now().naive_local(),
        })?;

        let ctx = ScaffoldContext::new(
            &workspace.fs,
            &workspace.templates,
            workspace.config.modules_root(),
        );
        let plan = generator.plan(&ctx)?;

        ctx.apply(&plan, |event| {
            if let WriteEvent::File(file, path) = event {
                print_written(file, path);
            }
        })?;

        println!(
            "Migration {} created in module {}",
            style(generator.file_name()).green().bold(),
            style(&self.module).cyan()
        );

        Ok(())
    }
}
