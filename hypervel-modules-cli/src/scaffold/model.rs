//! `make-module-model`: models with optional migration, factory and seeder
//!
//! The model file is written first. Each requested companion then runs as a
//! separate step, in the order migration, factory, seeder. An I/O failure in
//! one companion is recorded and the remaining steps still run; a missing
//! stub aborts the whole command.

use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

use super::generator::{base_placeholders, ScaffoldContext, ScaffoldPlan, WriteEvent};
use super::helpers::NameForm;
use super::migration::{MigrationGenerator, MigrationOptions, MigrationTable};
use crate::error::{ScaffoldError, ScaffoldResult};

/// Companion file generated alongside a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// `create_<table>_table` migration
    Migration,
    /// Model factory
    Factory,
    /// Database seeder
    Seeder,
}

impl fmt::Display for CascadeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Migration => "migration",
            Self::Factory => "factory",
            Self::Seeder => "seeder",
        })
    }
}

/// Options for `make-module-model`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOptions {
    /// Target module
    pub module: String,
    /// Model name; plural input is singularized
    pub name: String,
    /// Also generate a create-table migration
    pub migration: bool,
    /// Also generate a factory
    pub factory: bool,
    /// Also generate a seeder
    pub seeder: bool,
    /// Root namespace
    pub namespace: String,
    /// Timestamp for the cascaded migration
    pub created_at: NaiveDateTime,
}

/// A companion step that failed without aborting the command
#[derive(Debug)]
pub struct CascadeFailure {
    /// Which step failed
    pub step: CascadeStep,
    /// Why
    pub error: ScaffoldError,
}

/// Result of a model run
#[derive(Debug, Default)]
pub struct ModelOutcome {
    /// Every file written, model first
    pub written: Vec<PathBuf>,
    /// Companion steps that failed
    pub failures: Vec<CascadeFailure>,
}

impl ModelOutcome {
    /// True when every requested step succeeded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generator for module models
pub struct ModelGenerator {
    options: ModelOptions,
    names: NameForm,
}

impl ModelGenerator {
    /// Create a generator for `options`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidIdentifier`] for unusable names.
    pub fn new(options: ModelOptions) -> ScaffoldResult<Self> {
        NameForm::derive(&options.module)?;
        let names = NameForm::derive(&options.name)?;
        Ok(Self { options, names })
    }

    /// Singular model class
    #[must_use]
    pub fn class_name(&self) -> String {
        self.names.singular_class()
    }

    /// Table name backing the model
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.names.table_name()
    }

    /// Requested companion steps in execution order
    #[must_use]
    pub fn steps(&self) -> Vec<CascadeStep> {
        [
            (self.options.migration, CascadeStep::Migration),
            (self.options.factory, CascadeStep::Factory),
            (self.options.seeder, CascadeStep::Seeder),
        ]
        .into_iter()
        .filter_map(|(enabled, step)| enabled.then_some(step))
        .collect()
    }

    /// Build the plan for the model file alone
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ModuleNotFound`] if the module does not exist,
    /// or a template error.
    pub fn plan(&self, ctx: &ScaffoldContext<'_>) -> ScaffoldResult<ScaffoldPlan> {
        let root = ctx.require_module(&self.options.module)?;
        let class_name = self.class_name();

        let placeholders = base_placeholders(&self.options.module, &self.options.namespace)
            .with("MODEL_NAME", class_name.as_str())
            .with("TABLE_NAME", self.table_name());

        let mut plan = ScaffoldPlan::new(root);
        plan.directory("src/Models");
        plan.file(
            format!("src/Models/{class_name}.php"),
            ctx.render("model", &placeholders)?,
            "model",
        );
        Ok(plan)
    }

    /// Build the plan for one companion step
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ModuleNotFound`] if the module does not exist,
    /// or a template error.
    pub fn cascade_plan(
        &self,
        step: CascadeStep,
        ctx: &ScaffoldContext<'_>,
    ) -> ScaffoldResult<ScaffoldPlan> {
        let class_name = self.class_name();

        let (dir, stub, suffix) = match step {
            CascadeStep::Migration => {
                let table = self.table_name().to_string();
                return MigrationGenerator::new(MigrationOptions {
                    module: self.options.module.clone(),
                    name: format!("create_{table}_table"),
                    table: MigrationTable::Create(table),
                    namespace: self.options.namespace.clone(),
                    created_at: self.options.created_at,
                })?
                .plan(ctx);
            }
            CascadeStep::Factory => ("src/Database/Factories", "factory", "Factory"),
            CascadeStep::Seeder => ("src/Database/Seeders", "seeder", "Seeder"),
        };

        let root = ctx.require_module(&self.options.module)?;
        let placeholders = base_placeholders(&self.options.module, &self.options.namespace)
            .with("CLASS_NAME", class_name.as_str());

        let mut plan = ScaffoldPlan::new(root);
        plan.directory(dir);
        plan.file(
            PathBuf::from(dir).join(format!("{class_name}{suffix}.php")),
            ctx.render(stub, &placeholders)?,
            step.to_string(),
        );
        Ok(plan)
    }

    /// Write the model, then every requested companion
    ///
    /// # Errors
    ///
    /// Fails outright if the model itself cannot be planned or written, or if
    /// any stub is missing. Other companion failures are collected in
    /// [`ModelOutcome::failures`].
    pub fn generate<F>(
        &self,
        ctx: &ScaffoldContext<'_>,
        mut on_write: F,
    ) -> ScaffoldResult<ModelOutcome>
    where
        F: FnMut(WriteEvent<'_>),
    {
        let mut outcome = ModelOutcome {
            written: ctx.apply(&self.plan(ctx)?, &mut on_write)?,
            failures: Vec::new(),
        };

        for step in self.steps() {
            let result = self
                .cascade_plan(step, ctx)
                .and_then(|plan| ctx.apply(&plan, &mut on_write));

            match result {
                Ok(written) => outcome.written.extend(written),
                Err(error @ ScaffoldError::TemplateNotFound { .. }) => return Err(error),
                Err(error) => {
                    tracing::warn!(%step, %error, "cascade step failed");
                    outcome.failures.push(CascadeFailure { step, error });
                }
            }
        }

        Ok(outcome)
    }
}
