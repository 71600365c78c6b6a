//! hypervel-modules CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use commands::{
    ControllerCommand, IncompleteCascade, MigrationCommand, ModelCommand, ModuleCommand,
    StubsCommand, Workspace,
};
use console::style;
use hypervel_modules::scaffold::{ControllerKind, MigrationTable};
use hypervel_modules::{observability, ScaffoldConfig, ScaffoldError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hypervel-modules")]
#[command(version)]
#[command(about = "Module scaffolding for Hypervel applications", long_about = None)]
struct Cli {
    /// Application root containing the modules directory
    #[arg(long, global = true, value_name = "DIR")]
    base_path: Option<PathBuf>,

    /// Configuration file to use instead of ./hypervel-modules.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new module
    MakeModule {
        /// Module name
        name: String,

        /// Root namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Create a controller in a module
    #[command(group(ArgGroup::new("kind").args(["resource", "api"])))]
    MakeModuleController {
        /// Module name
        module: String,

        /// Controller name
        name: String,

        /// Generate a resource controller with CRUD methods
        #[arg(long)]
        resource: bool,

        /// Generate an API resource controller
        #[arg(long)]
        api: bool,

        /// Root namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Create a migration in a module
    #[command(group(ArgGroup::new("table_kind").args(["create", "table"])))]
    MakeModuleMigration {
        /// Module name
        module: String,

        /// Migration name (e.g. `create_posts_table`)
        name: String,

        /// Table to be created
        #[arg(long, value_name = "TABLE")]
        create: Option<String>,

        /// Table to be modified
        #[arg(long, value_name = "TABLE")]
        table: Option<String>,

        /// Root namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Create a model in a module
    MakeModuleModel {
        /// Module name
        module: String,

        /// Model name
        name: String,

        /// Also create a migration
        #[arg(long)]
        migration: bool,

        /// Also create a factory
        #[arg(long)]
        factory: bool,

        /// Also create a seeder
        #[arg(long)]
        seeder: bool,

        /// Root namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Manage stub templates
    Stubs {
        #[command(subcommand)]
        command: StubsCommand,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = observability::init(cli.verbose) {
        eprintln!("{} {err}", style("warning:").yellow().bold());
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ScaffoldConfig::load(cli.config.as_deref())?;
    if let Some(base_path) = cli.base_path {
        config.paths.base_path = base_path;
    }
    tracing::debug!(modules_root = %config.modules_root().display(), "configuration loaded");

    let workspace = Workspace::new(config);

    match cli.command {
        Commands::MakeModule { name, namespace } => {
            ModuleCommand::new(name, namespace).execute(&workspace)?;
        }
        Commands::MakeModuleController {
            module,
            name,
            resource,
            api,
            namespace,
        } => {
            let kind = ControllerKind::from_flags(resource, api);
            ControllerCommand::new(module, name, kind, namespace).execute(&workspace)?;
        }
        Commands::MakeModuleMigration {
            module,
            name,
            create,
            table,
            namespace,
        } => {
            let table = MigrationTable::from_options(create, table);
            MigrationCommand::new(module, name, table, namespace).execute(&workspace)?;
        }
        Commands::MakeModuleModel {
            module,
            name,
            migration,
            factory,
            seeder,
            namespace,
        } => {
            ModelCommand::new(module, name, migration, factory, seeder, namespace)
                .execute(&workspace)?;
        }
        Commands::Stubs { command } => {
            command.execute(&workspace)?;
        }
    }

    Ok(())
}

/// `1` for failed preconditions and incomplete cascades, `2` for fatal errors
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<ScaffoldError>() {
        if err.is_precondition() {
            1
        } else {
            2
        }
    } else if err.downcast_ref::<IncompleteCascade>().is_some() {
        1
    } else {
        2
    }
}
