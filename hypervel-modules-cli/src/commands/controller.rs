//! `make-module-controller` command

use anyhow::Result;
use console::style;
use hypervel_modules::scaffold::{
    ControllerGenerator, ControllerKind, ControllerOptions, ScaffoldContext, WriteEvent,
};

use super::{print_written, Workspace};

/// Create a controller inside an existing module
pub struct ControllerCommand {
    module: String,
    name: String,
    kind: ControllerKind,
    namespace: Option<String>,
}

impl ControllerCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(
        module: String,
        name: String,
        kind: ControllerKind,
        namespace: Option<String>,
    ) -> Self {
        Self {
            module,
            name,
            kind,
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
        let generator = ControllerGenerator::new(ControllerOptions {
            module: self.module.clone(),
            name: self.name.clone(),
            kind: self.kind,
            namespace: workspace.namespace(self.namespace.as_deref()),
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
            "{} {} created in module {}",
            style(generator.class_name()).green().bold(),
            match self.kind {
                ControllerKind::Basic => "controller",
                ControllerKind::Resource => "resource controller",
                ControllerKind::Api => "API controller",
            },
            style(&self.module).cyan()
        );

        Ok(())
    }
}
