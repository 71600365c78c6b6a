//! Stub templates and placeholder substitution
//!
//! Stubs are plain text files containing `{{TOKEN}}` placeholders. A stub is
//! resolved from the configured stub directories first (`<dir>/<name>.stub`),
//! then from the copies compiled into the binary.
//!
//! Substitution is literal and happens in a single pass: inserted values are
//! never rescanned, and tokens without a value are left exactly as written.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{ScaffoldError, ScaffoldResult};

/// File extension used by stub files on disk
pub const STUB_EXTENSION: &str = "stub";

/// Built-in stubs, as `(name, body)` pairs
pub const BUILTIN_STUBS: &[(&str, &str)] = &[
    ("service-provider", include_str!("../../stubs/service-provider.stub")),
    ("api-routes", include_str!("../../stubs/api-routes.stub")),
    ("config", include_str!("../../stubs/config.stub")),
    ("api-controller", include_str!("../../stubs/api-controller.stub")),
    ("model", include_str!("../../stubs/model.stub")),
    ("middleware", include_str!("../../stubs/middleware.stub")),
    ("controller-basic", include_str!("../../stubs/controller-basic.stub")),
    ("controller-resource", include_str!("../../stubs/controller-resource.stub")),
    ("migration-create", include_str!("../../stubs/migration-create.stub")),
    ("migration-modify", include_str!("../../stubs/migration-modify.stub")),
    ("migration-generic", include_str!("../../stubs/migration-generic.stub")),
    ("factory", include_str!("../../stubs/factory.stub")),
    ("seeder", include_str!("../../stubs/seeder.stub")),
];

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // A token is anything between `{{` and `}}` that contains no braces
        Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern compiles")
    })
}

/// Token name to replacement value
///
/// # Examples
///
/// ```
/// # use hypervel_modules::scaffold::templates::{render_str, Placeholders};
/// let placeholders = Placeholders::new().with("A", "x");
/// assert_eq!(render_str("{{A}}{{B}}", &placeholders), "x{{B}}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: HashMap<String, String>,
}

impl Placeholders {
    /// Create an empty placeholder map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value, builder style
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value for `key`, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Substitute every mapped `{{TOKEN}}` in `body`
#[must_use]
pub fn render_str(body: &str, placeholders: &Placeholders) -> String {
    placeholder_pattern()
        .replace_all(body, |caps: &Captures<'_>| {
            placeholders
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), str::to_string)
        })
        .into_owned()
}

/// Where a stub was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// A file in one of the stub directories
    File(PathBuf),
    /// The copy compiled into the binary
    Builtin,
}

/// A loaded stub
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    body: Cow<'static, str>,
    origin: TemplateOrigin,
}

impl Template {
    /// Template name, without extension
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template text
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Where the template was resolved from
    #[must_use]
    pub const fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }

    /// Render this template with `placeholders`
    #[must_use]
    pub fn render(&self, placeholders: &Placeholders) -> String {
        render_str(&self.body, placeholders)
    }
}

/// Resolves stub names to template bodies
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    dirs: Vec<PathBuf>,
    builtin: bool,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateLibrary {
    /// Create a library searching `dirs` in order, then optionally the built-in stubs
    #[must_use]
    pub const fn new(dirs: Vec<PathBuf>, builtin: bool) -> Self {
        Self { dirs, builtin }
    }

    /// Library that only uses the built-in stubs
    #[must_use]
    pub const fn builtin() -> Self {
        Self::new(Vec::new(), true)
    }

    /// Load a stub by name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] if no directory contains
    /// `<name>.stub` and there is no built-in stub of that name, or
    /// [`ScaffoldError::Io`] if a stub file exists but cannot be read.
    pub fn load(&self, name: &str) -> ScaffoldResult<Template> {
        let mut searched = Vec::with_capacity(self.dirs.len() + 1);

        for dir in &self.dirs {
            let path = stub_path(dir, name);
            if path.is_file() {
                let body = std::fs::read_to_string(&path)
                    .map_err(|e| ScaffoldError::io(&path, e))?;
                tracing::debug!(template = name, path = %path.display(), "loaded stub from disk");
                return Ok(Template {
                    name: name.to_string(),
                    body: Cow::Owned(body),
                    origin: TemplateOrigin::File(path),
                });
            }
            searched.push(path.display().to_string());
        }

        if self.builtin {
            if let Some(body) = builtin_stub(name) {
                tracing::debug!(template = name, "using built-in stub");
                return Ok(Template {
                    name: name.to_string(),
                    body: Cow::Borrowed(body),
                    origin: TemplateOrigin::Builtin,
                });
            }
            searched.push(format!("<built-in>/{name}.{STUB_EXTENSION}"));
        }

        Err(ScaffoldError::TemplateNotFound {
            name: name.to_string(),
            searched,
        })
    }

    /// Load a stub and substitute `placeholders`
    ///
    /// # Errors
    ///
    /// Same as [`TemplateLibrary::load`].
    pub fn render(&self, name: &str, placeholders: &Placeholders) -> ScaffoldResult<String> {
        Ok(self.load(name)?.render(placeholders))
    }
}

/// Path of stub `name` inside `dir`
#[must_use]
pub fn stub_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{STUB_EXTENSION}"))
}

/// Body of the built-in stub `name`
#[must_use]
pub fn builtin_stub(name: &str) -> Option<&'static str> {
    BUILTIN_STUBS
        .iter()
        .find(|(stub, _)| *stub == name)
        .map(|(_, body)| *body)
}
