//! Module scaffolding for Hypervel applications
//!
//! Generates self-contained modules (service provider, routes, config,
//! controllers, models, migrations, factories, seeders) from stub templates.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;

pub use config::ScaffoldConfig;
pub use error::{ScaffoldError, ScaffoldResult};
