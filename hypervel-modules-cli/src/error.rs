//! Error types for module scaffolding

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the scaffold layer
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Errors that can occur while generating module files
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The target module directory is already present
    #[error("Module {name} already exists! ({})", .path.display())]
    ModuleAlreadyExists {
        /// Module name as supplied by the user
        name: String,
        /// Module root that was found on disk
        path: PathBuf,
    },

    /// A sub-generator was pointed at a module that has not been created
    #[error(
        "Module {name} does not exist! ({})\n\
        Create the module first using: hypervel-modules make-module {name}",
        .path.display()
    )]
    ModuleNotFound {
        /// Module name as supplied by the user
        name: String,
        /// Module root that was expected
        path: PathBuf,
    },

    /// The identifier cannot be used as a name
    #[error("invalid name '{value}': {reason}")]
    InvalidIdentifier {
        /// The rejected identifier
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Template was not found in any location
    #[error("template not found: {name} (searched: {})", format_searched(.searched))]
    TemplateNotFound {
        /// Template name, without the `.stub` extension
        name: String,
        /// Locations that were searched, in order
        searched: Vec<String>,
    },

    /// Filesystem operation failed
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// The module manifest could not be serialized
    #[error("failed to serialize module manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ScaffoldError {
    /// Whether this error is a failed precondition rather than a fatal fault
    ///
    /// Precondition failures are reported with exit code `1`; everything else
    /// is treated as fatal.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::ModuleAlreadyExists { .. }
                | Self::ModuleNotFound { .. }
                | Self::InvalidIdentifier { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_searched(searched: &[String]) -> String {
    if searched.is_empty() {
        "nowhere".to_string()
    } else {
        searched.join(", ")
    }
}
