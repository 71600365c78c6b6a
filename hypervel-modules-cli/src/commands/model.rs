//! `make-module-model` command

use anyhow::Result;
use console::style;
use hypervel_modules::scaffold::{ModelGenerator, ModelOptions, ScaffoldContext, WriteEvent};

use super::{print_written, Workspace, WARNING};

/// One or more companion files of a model could not be generated
#[derive(Debug, thiserror::Error)]
#[error("{failed} of {requested} companion file(s) for model {model} could not be generated")]
pub struct IncompleteCascade {
    /// Model class
    pub model: String,
    /// Failed steps
    pub failed: usize,
    /// Requested steps
    pub requested: usize,
}

/// Create a model, and optionally its migration, factory and seeder
pub struct ModelCommand {
    module: String,
    name: String,
    migration: bool,
    factory: bool,
    seeder: bool,
    namespace: Option<String>,
}

impl ModelCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(
        module: String,
        name: String,
        migration: bool,
        factory: bool,
        seeder: bool,
        namespace: Option<String>,
    ) -> Self {
        Self {
            module,
            name,
            migration,
            factory,
            seeder,
            namespace,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the module does not exist, the model cannot be
    /// written, a stub is missing, or any companion step failed.
    pub fn execute(&self, workspace: &Workspace) -> Result<()> {
        let generator = ModelGenerator::new(ModelOptions {
            module: self.module.clone(),
            name: self.name.clone(),
            migration: self.migration,
            factory: self.factory,
            seeder: self.seeder,
            namespace: workspace.namespace(self.namespace.as_deref()),
            created_at: chrono::Local::now().naive_local(),
        })?;

        let ctx = ScaffoldContext::new(
            &workspace.fs,
            &workspace.templates,
            workspace.config.modules_root(),
        );

        let outcome = generator.generate(&ctx, |event| {
            if let WriteEvent::File(file, path) = event {
                print_written(file, path);
            }
        })?;

        for failure in &outcome.failures {
            eprintln!(
                "{}{}",
                style(WARNING).yellow(),
                style(format!("Failed to create {}: {}", failure.step, failure.error)).yellow()
            );
        }

        let model = generator.class_name();
        if !outcome.is_complete() {
            return Err(IncompleteCascade {
                failed: outcome.failures.len(),
                requested: generator.steps().len(),
                model,
            }
            .into());
        }

        println!(
            "Model {} created in module {}",
            style(&model).green().bold(),
            style(&self.module).cyan()
        );

        Ok(())
    }
}
