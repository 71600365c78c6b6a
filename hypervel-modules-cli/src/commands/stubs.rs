//! Stub management commands

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use hypervel_modules::scaffold::templates::{stub_path, BUILTIN_STUBS};
use hypervel_modules::scaffold::{Filesystem, TemplateOrigin};
use hypervel_modules::ScaffoldConfig;
use std::path::{Path, PathBuf};

use super::{Workspace, SUCCESS};

/// Stub management commands
#[derive(Debug, Subcommand)]
pub enum StubsCommand {
    /// Copy the built-in stubs to the user stub directory for customization
    ///
    /// Published stubs take precedence over the built-in copies.
    Publish {
        /// Overwrite stubs that have already been published
        #[arg(long)]
        force: bool,

        /// Target directory (default: the user stub directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Show where each stub would be loaded from
    List,
}

impl StubsCommand {
    /// Execute the stubs command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No user stub directory can be determined
    /// - A stub cannot be read or written
    pub fn execute(&self, workspace: &Workspace) -> Result<()> {
        match self {
            Self::Publish { force, dir } => {
                let target = match dir {
                    Some(dir) => dir.clone(),
                    None => ScaffoldConfig::user_stub_dir()
                        .context("Could not determine the user configuration directory")?,
                };
                publish(&workspace.fs, &target, *force)
            }
            Self::List => list(workspace),
        }
    }
}

/// Write every built-in stub into `target`
fn publish(fs: &dyn Filesystem, target: &Path, force: bool) -> Result<()> {
    fs.create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;

    let mut published = 0;
    for (name, body) in BUILTIN_STUBS {
        let path = stub_path(target, name);
        if !force && fs.exists(&path) {
            println!(
                "  {} {} (already published, use --force to overwrite)",
                style("-").dim(),
                style(path.display()).dim()
            );
            continue;
        }

        fs.write(&path, body)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "published stub");
        println!("  {}{}", style(SUCCESS).green(), style(path.display()).dim());
        published += 1;
    }

    println!(
        "\n{} {} stub(s) to {}",
        style("Published").green().bold(),
        published,
        style(target.display()).cyan()
    );

    Ok(())
}

fn list(workspace: &Workspace) -> Result<()> {
    for (name, _) in BUILTIN_STUBS {
        let template = workspace.templates.load(name)?;
        let origin = match template.origin() {
            TemplateOrigin::File(path) => path.display().to_string(),
            TemplateOrigin::Builtin => "built-in".to_string(),
        };
        println!("  {} {}", style(format!("{name:<20}")).cyan(), style(origin).dim());
    }

    Ok(())
}
