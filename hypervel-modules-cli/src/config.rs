//! Configuration for the scaffolding CLI
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Command-line flags (highest priority, applied by the caller)
//! 2. Environment variables (`HYPERVEL_MODULES_` prefix, `__` for nesting)
//! 3. `./hypervel-modules.toml`, or the file passed with `--config`
//! 4. `~/.config/hypervel-modules/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! Example: `HYPERVEL_MODULES_PATHS__MODULES_DIR=packages`
//!
//! # Example Configuration
//!
//! ```toml
//! namespace = "Acme\\Modules"
//!
//! [paths]
//! modules_dir = "modules"
//!
//! [templates]
//! dirs = ["./stubs"]
//! embedded = true
//!
//! [manifest]
//! vendor = "acme"
//! author_name = "Jane Doe"
//! author_email = "jane@example.com"
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scaffold::templates::TemplateLibrary;

/// Application name used for config and stub directories
pub const APP_NAME: &str = "hypervel-modules";

/// Project-local configuration file name
pub const LOCAL_CONFIG_FILE: &str = "hypervel-modules.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HYPERVEL_MODULES_";

/// Where generated modules live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathSettings {
    /// Application root that `modules_dir` is relative to
    pub base_path: PathBuf,

    /// Directory holding all modules, relative to `base_path`
    pub modules_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            modules_dir: PathBuf::from("modules"),
        }
    }
}

impl PathSettings {
    /// Absolute-or-relative directory containing every module
    #[must_use]
    pub fn modules_root(&self) -> PathBuf {
        self.base_path.join(&self.modules_dir)
    }
}

/// Stub lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateSettings {
    /// Extra stub directories, searched in order before the user stub directory
    pub dirs: Vec<PathBuf>,

    /// Fall back to the stubs compiled into the binary
    pub embedded: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            embedded: true,
        }
    }
}

/// Values written into generated `composer.json` files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestSettings {
    /// Composer vendor, also used as the `extra` key
    pub vendor: String,

    /// Framework display name used in descriptions
    pub framework_name: String,

    /// SPDX license identifier
    pub license: String,

    /// Placeholder author name
    pub author_name: String,

    /// Placeholder author email
    pub author_email: String,

    /// PHP version constraint
    pub php_version: String,

    /// Framework composer package
    pub framework_package: String,

    /// Framework version constraint
    pub framework_version: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            vendor: "hypervel".to_string(),
            framework_name: "Hypervel".to_string(),
            license: "MIT".to_string(),
            author_name: "Your Name".to_string(),
            author_email: "your.email@example.com".to_string(),
            php_version: ">=8.2".to_string(),
            framework_package: "hypervel/framework".to_string(),
            framework_version: "^0.3".to_string(),
        }
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Root namespace that module namespaces are nested under
    pub namespace: String,

    /// Filesystem layout
    pub paths: PathSettings,

    /// Stub lookup
    pub templates: TemplateSettings,

    /// `composer.json` values
    pub manifest: ManifestSettings,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            namespace: r"App\Modules".to_string(),
            paths: PathSettings::default(),
            templates: TemplateSettings::default(),
            manifest: ManifestSettings::default(),
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration from the standard locations
    ///
    /// When `explicit` is given it replaces `./hypervel-modules.toml` and must
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - `explicit` does not exist
    /// - Configuration values fail type conversion
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                tracing::debug!(path = %user_config.display(), "merging user config");
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file not found: {}", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_config.exists() {
                    tracing::debug!(path = %local_config.display(), "merging project config");
                    figment = figment.merge(Toml::file(&local_config));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// `~/.config/hypervel-modules/config.toml`
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }

    /// `~/.config/hypervel-modules/stubs`, where published stubs are kept
    #[must_use]
    pub fn user_stub_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("stubs"))
    }

    /// Directory containing every module
    #[must_use]
    pub fn modules_root(&self) -> PathBuf {
        self.paths.modules_root()
    }

    /// Stub directories in search order: configured directories, then the
    /// user stub directory
    #[must_use]
    pub fn stub_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.templates.dirs.clone();
        if let Some(user_dir) = Self::user_stub_dir() {
            if !dirs.contains(&user_dir) {
                dirs.push(user_dir);
            }
        }
        dirs
    }

    /// Template library configured from these settings
    #[must_use]
    pub fn template_library(&self) -> TemplateLibrary {
        TemplateLibrary::new(self.stub_dirs(), self.templates.embedded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.namespace, r"App\Modules");
        assert_eq!(config.modules_root(), PathBuf::from("./modules"));
        assert!(config.templates.embedded);
        assert_eq!(config.manifest.vendor, "hypervel");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("hypervel-modules.toml");
        std::fs::write(
            &path,
            r#"
namespace = "Acme\\Modules"

[paths]
modules_dir = "packages"

[manifest]
vendor = "acme"
"#,
        )
        .unwrap();

        let config = ScaffoldConfig::load(Some(&path)).unwrap();
        assert_eq!(config.namespace, r"Acme\Modules");
        assert_eq!(config.paths.modules_dir, PathBuf::from("packages"));
        assert_eq!(config.manifest.vendor, "acme");
        // Untouched values keep their defaults
        assert_eq!(config.manifest.license, "MIT");
        assert!(config.templates.embedded);
    }

    #[test]
    fn test_load_rejects_missing_explicit_file() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(ScaffoldConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_stub_dirs_keep_configured_order() {
        let mut config = ScaffoldConfig::default();
        config.templates.dirs = vec![PathBuf::from("a"), PathBuf::from("b")];

        let dirs = config.stub_dirs();
        assert_eq!(dirs[0], PathBuf::from("a"));
        assert_eq!(dirs[1], PathBuf::from("b"));
    }
}
