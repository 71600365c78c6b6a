//! `composer.json` package descriptor for new modules
//!
//! Unlike the other module files this is not rendered from a stub: it is
//! built as a typed document and serialized, so the output is always valid
//! JSON regardless of the module name or namespace.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ManifestSettings;
use crate::error::ScaffoldResult;

/// Package descriptor written to `modules/<Name>/composer.json`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Manifest {
    /// `<vendor>/module-<name>`
    pub name: String,
    /// Always `library`
    #[serde(rename = "type")]
    pub kind: String,
    /// Human description
    pub description: String,
    /// Search keywords
    pub keywords: Vec<String>,
    /// SPDX license identifier
    pub license: String,
    /// Package authors
    pub authors: Vec<Author>,
    /// Runtime requirements
    pub require: BTreeMap<String, String>,
    /// Class autoloading
    pub autoload: Autoload,
    /// Framework integration block
    pub extra: BTreeMap<String, ExtraProviders>,
    /// Composer behaviour
    pub config: ComposerConfig,
    /// Minimum accepted stability
    #[serde(rename = "minimum-stability")]
    pub minimum_stability: String,
    /// Prefer stable releases when possible
    #[serde(rename = "prefer-stable")]
    pub prefer_stable: bool,
}

/// A package author
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Author {
    /// Author name
    pub name: String,
    /// Author email
    pub email: String,
}

/// Autoload mapping (`namespace prefix` -> `source directory`)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Autoload {
    /// PSR-4 prefixes
    #[serde(rename = "psr-4")]
    pub psr4: BTreeMap<String, String>,
}

/// Service providers registered with the framework
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtraProviders {
    /// Fully-qualified provider classes
    pub providers: Vec<String>,
}

/// Composer `config` block
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Keep `require` sorted when packages are added
    #[serde(rename = "sort-packages")]
    pub sort_packages: bool,
}

impl Manifest {
    /// Build the manifest for module `module` under `namespace`
    #[must_use]
    pub fn new(module: &str, namespace: &str, settings: &ManifestSettings) -> Self {
        let package = module.to_lowercase();
        let full_namespace = format!("{namespace}\\{module}");
        let provider = format!("{full_namespace}\\Providers\\{module}ServiceProvider");

        let require = BTreeMap::from([
            ("php".to_string(), settings.php_version.clone()),
            (
                settings.framework_package.clone(),
                settings.framework_version.clone(),
            ),
        ]);

        Self {
            name: format!("{}/module-{package}", settings.vendor),
            kind: "library".to_string(),
            description: format!("{module} module for {} framework", settings.framework_name),
            keywords: vec![settings.vendor.clone(), "module".to_string(), package],
            license: settings.license.clone(),
            authors: vec![Author {
                name: settings.author_name.clone(),
                email: settings.author_email.clone(),
            }],
            require,
            autoload: Autoload {
                psr4: BTreeMap::from([(format!("{full_namespace}\\"), "src/".to_string())]),
            },
            extra: BTreeMap::from([(
                settings.vendor.clone(),
                ExtraProviders {
                    providers: vec![provider],
                },
            )]),
            config: ComposerConfig {
                sort_packages: true,
            },
            minimum_stability: "dev".to_string(),
            prefer_stable: true,
        }
    }

    /// Serialize as pretty JSON with 4-space indentation and a trailing newline
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScaffoldError::Manifest`] if serialization fails.
    pub fn to_json(&self) -> ScaffoldResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;

        let mut json = String::from_utf8_lossy(&buf).into_owned();
        json.push('\n');
        Ok(json)
    }
}
