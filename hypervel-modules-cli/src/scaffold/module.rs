//! `make-module`: a complete module skeleton

use std::path::PathBuf;

use super::generator::{base_placeholders, ScaffoldContext, ScaffoldPlan};
use super::helpers::{NameForm, TemplateHelpers};
use super::manifest::Manifest;
use crate::config::ManifestSettings;
use crate::error::{ScaffoldError, ScaffoldResult};

/// Directories created inside every new module
pub const MODULE_DIRECTORIES: &[&str] = &[
    "src/Http/Controllers",
    "src/Http/Middleware",
    "src/Http/Requests",
    "src/Models",
    "src/Database/Migrations",
    "src/Database/Seeders",
    "src/Database/Factories",
    "src/Routes",
    "src/Providers",
    "config",
];

/// Options for `make-module`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Module name, used verbatim for the directory and namespace segment
    pub name: String,
    /// Root namespace (e.g. `App\Modules`)
    pub namespace: String,
    /// Values for `composer.json`
    pub manifest: ManifestSettings,
}

/// Generator for new modules
pub struct ModuleGenerator {
    options: ModuleOptions,
    names: NameForm,
}

impl ModuleGenerator {
    /// Create a generator for `options`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidIdentifier`] for unusable module names.
    pub fn new(options: ModuleOptions) -> ScaffoldResult<Self> {
        let names = NameForm::derive(&options.name)?;
        Ok(Self { options, names })
    }

    /// Build the plan for the module
    ///
    /// The existence check happens here, before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ModuleAlreadyExists`] if the module directory
    /// is present, or a template/manifest error if a file cannot be produced.
    pub fn plan(&self, ctx: &ScaffoldContext<'_>) -> ScaffoldResult<ScaffoldPlan> {
        let module = self.names.raw();
        let root = ctx.module_path(module);

        if ctx.fs().exists(&root) {
            return Err(ScaffoldError::ModuleAlreadyExists {
                name: module.to_string(),
                path: root,
            });
        }

        let namespace = &self.options.namespace;
        let config_name = TemplateHelpers::to_config_name(module);
        let model_class = self.names.singular_class();

        let mut placeholders = base_placeholders(module, namespace);
        placeholders.insert("CONFIG_NAME", config_name.as_str());
        placeholders.insert("CONFIG_KEY", config_name.to_uppercase());

        let mut model_placeholders = placeholders.clone();
        model_placeholders.insert("MODEL_NAME", model_class.as_str());
        model_placeholders.insert("TABLE_NAME", self.names.table_name());

        let mut plan = ScaffoldPlan::new(root);
        for dir in MODULE_DIRECTORIES {
            plan.directory(*dir);
        }

        plan.file(
            "composer.json",
            Manifest::new(module, namespace, &self.options.manifest).to_json()?,
            "composer.json",
        );
        plan.file(
            format!("src/Providers/{module}ServiceProvider.php"),
            ctx.render("service-provider", &placeholders)?,
            "service provider",
        );
        plan.file(
            "src/Routes/api.php",
            ctx.render("api-routes", &placeholders)?,
            "route files",
        );
        plan.file(
            PathBuf::from("config").join(format!("{config_name}.php")),
            ctx.render("config", &placeholders)?,
            "config file",
        );
        plan.file(
            "src/Http/Controllers/ApiController.php",
            ctx.render("api-controller", &placeholders)?,
            "default controller",
        );
        plan.file(
            format!("src/Models/{model_class}.php"),
            ctx.render("model", &model_placeholders)?,
            "default model",
        );
        plan.file(
            format!("src/Http/Middleware/{module}Middleware.php"),
            ctx.render("middleware", &placeholders)?,
            "middleware",
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::fs::{Filesystem, MemoryFilesystem};
    use crate::scaffold::templates::TemplateLibrary;
    use std::path::Path;

    fn options(name: &str) -> ModuleOptions {
        ModuleOptions {
            name: name.to_string(),
            namespace: r"App\Modules".to_string(),
            manifest: ManifestSettings::default(),
        }
    }

    #[test]
    fn test_plan_layout() {
        let fs = MemoryFilesystem::new();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let plan = ModuleGenerator::new(options("Posts")).unwrap().plan(&ctx).unwrap();

        assert_eq!(plan.root, PathBuf::from("modules/Posts"));
        assert_eq!(plan.directories.len(), MODULE_DIRECTORIES.len());
        let paths: Vec<_> = plan.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("composer.json"),
                PathBuf::from("src/Providers/PostsServiceProvider.php"),
                PathBuf::from("src/Routes/api.php"),
                PathBuf::from("config/posts.php"),
                PathBuf::from("src/Http/Controllers/ApiController.php"),
                PathBuf::from("src/Models/Post.php"),
                PathBuf::from("src/Http/Middleware/PostsMiddleware.php"),
            ]
        );
        // Planning never writes
        assert!(fs.files().is_empty());
    }

    #[test]
    fn test_model_uses_singular_class_and_table() {
        let fs = MemoryFilesystem::new();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let plan = ModuleGenerator::new(options("Posts")).unwrap().plan(&ctx).unwrap();
        let model = &plan.files[5];

        assert!(model.content.contains("class Post extends Model"));
        assert!(model.content.contains("'posts'"));
        assert!(model.content.contains(r"namespace App\Modules\Posts\Models;"));
    }

    #[test]
    fn test_existing_module_rejected_before_planning() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("modules/Posts")).unwrap();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let err = ModuleGenerator::new(options("Posts")).unwrap().plan(&ctx).unwrap_err();
        assert!(matches!(err, ScaffoldError::ModuleAlreadyExists { .. }));
    }

    #[test]
    fn test_missing_stub_is_fatal() {
        let fs = MemoryFilesystem::new();
        let temp_dir = tempfile::tempdir().unwrap();
        let templates = TemplateLibrary::new(vec![temp_dir.path().to_path_buf()], false);
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let err = ModuleGenerator::new(options("Posts")).unwrap().plan(&ctx).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound { .. }));
        assert!(!err.is_precondition());
        assert!(fs.files().is_empty());
    }
}
