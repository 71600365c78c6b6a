//! Module scaffolding
//!
//! Generators turn command options into a [`ScaffoldPlan`] of directories
//! and rendered stubs, which [`ScaffoldContext::apply`] then writes out.

pub mod controller;
pub mod fs;
pub mod generator;
pub mod helpers;
pub mod manifest;
pub mod migration;
pub mod model;
pub mod module;
pub mod templates;

pub use controller::{ControllerGenerator, ControllerKind, ControllerOptions};
pub use fs::{Filesystem, LocalFilesystem, MemoryFilesystem};
pub use generator::{GeneratedFile, ScaffoldContext, ScaffoldPlan, WriteEvent};
pub use helpers::{NameForm, TemplateHelpers};
pub use manifest::Manifest;
pub use migration::{MigrationGenerator, MigrationOptions, MigrationTable};
pub use model::{CascadeFailure, CascadeStep, ModelGenerator, ModelOptions, ModelOutcome};
pub use module::{ModuleGenerator, ModuleOptions};
pub use templates::{Placeholders, Template, TemplateLibrary, TemplateOrigin};
