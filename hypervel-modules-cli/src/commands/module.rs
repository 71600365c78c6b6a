//! `make-module` command

use anyhow::{Context, Result};
use console::style;
use hypervel_modules::scaffold::{ModuleGenerator, ModuleOptions, ScaffoldContext, WriteEvent};
use indicatif::{ProgressBar, ProgressStyle};

use super::{print_autoload_hint, print_partial, print_written, Workspace};

/// Create a new module
pub struct ModuleCommand {
    name: String,
    namespace: Option<String>,
}

impl ModuleCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(name: String, namespace: Option<String>) -> Self {
        Self { name, namespace }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the module already exists, a stub is missing, or a
    /// file cannot be written.
    pub fn execute(&self, workspace: &Workspace) -> Result<()> {
        let generator = ModuleGenerator::new(ModuleOptions {
            name: self.name.clone(),
            namespace: workspace.namespace(self.namespace.as_deref()),
            manifest: workspace.config.manifest.clone(),
        })?;

        let ctx = ScaffoldContext::new(
            &workspace.fs,
            &workspace.templates,
            workspace.config.modules_root(),
        );
        let plan = generator.plan(&ctx)?;

        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("module:").bold(),
            style(&self.name).cyan().bold()
        );

        let progress = ProgressBar::new((plan.directories.len() + plan.files.len()) as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.green} {pos}/{len} {msg}")
                .context("Failed to set progress style")?,
        );

        let mut directories = 0;
        let mut written = Vec::new();
        let result = ctx.apply(&plan, |event| {
            progress.inc(1);
            match event {
                WriteEvent::Directory(_) => directories += 1,
                WriteEvent::File(file, path) => {
                    progress.set_message(file.description.clone());
                    written.push((file.clone(), path.to_path_buf()));
                }
            }
        });
        progress.finish_and_clear();

        for (file, path) in &written {
            print_written(file, path);
        }

        if let Err(err) = result {
            print_partial(directories, written.len());
            return Err(err.into());
        }

        println!(
            "\n{}",
            style(format!("Module {} created successfully!", self.name))
                .green()
                .bold()
        );
        print_autoload_hint();

        Ok(())
    }
}
