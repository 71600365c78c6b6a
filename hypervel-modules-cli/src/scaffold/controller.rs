//! `make-module-controller`: controllers inside an existing module

use std::path::PathBuf;

use super::generator::{base_placeholders, ScaffoldContext, ScaffoldPlan};
use super::helpers::{NameForm, TemplateHelpers};
use crate::error::{ScaffoldError, ScaffoldResult};

const CONTROLLER_DIR: &str = "src/Http/Controllers";

/// Which controller stub to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerKind {
    /// A single `index` action
    #[default]
    Basic,
    /// CRUD actions
    Resource,
    /// CRUD actions for API use
    Api,
}

impl ControllerKind {
    /// Pick the kind from the mutually exclusive `--resource` / `--api` flags
    #[must_use]
    pub const fn from_flags(resource: bool, api: bool) -> Self {
        if api {
            Self::Api
        } else if resource {
            Self::Resource
        } else {
            Self::Basic
        }
    }

    /// Stub used for this kind
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Basic => "controller-basic",
            Self::Resource | Self::Api => "controller-resource",
        }
    }
}

/// Options for `make-module-controller`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Target module
    pub module: String,
    /// Controller name, with or without the `Controller` suffix
    pub name: String,
    /// Stub selection
    pub kind: ControllerKind,
    /// Root namespace
    pub namespace: String,
}

/// Generator for module controllers
pub struct ControllerGenerator {
    options: ControllerOptions,
    class_name: String,
}

impl ControllerGenerator {
    /// Create a generator for `options`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidIdentifier`] for unusable names, including
    /// a name that is nothing but the `Controller` suffix.
    pub fn new(options: ControllerOptions) -> ScaffoldResult<Self> {
        NameForm::derive(&options.module)?;
        NameForm::derive(&options.name)?;
        let class_name = TemplateHelpers::to_controller_class(&options.name);
        if TemplateHelpers::strip_controller_suffix(&class_name).is_empty() {
            return Err(ScaffoldError::InvalidIdentifier {
                value: options.name,
                reason: "controller name needs a stem before the `Controller` suffix",
            });
        }
        Ok(Self {
            options,
            class_name,
        })
    }

    /// Normalized class name (`<Name>Controller`)
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Model a resource controller operates on: suffix stripped, singularized
    #[must_use]
    pub fn model_name(&self) -> String {
        TemplateHelpers::singularize(TemplateHelpers::strip_controller_suffix(&self.class_name))
    }

    /// Build the plan for the controller
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScaffoldError::ModuleNotFound`] if the module
    /// does not exist, or a template error.
    pub fn plan(&self, ctx: &ScaffoldContext<'_>) -> ScaffoldResult<ScaffoldPlan> {
        let root = ctx.require_module(&self.options.module)?;

        let mut placeholders = base_placeholders(&self.options.module, &self.options.namespace);
        placeholders.insert("CLASS_NAME", self.class_name.as_str());

        let description = match self.options.kind {
            ControllerKind::Basic => "controller",
            ControllerKind::Resource => {
                placeholders.insert("MODEL_NAME", self.model_name());
                placeholders.insert("IS_API", "false");
                "resource controller with CRUD methods"
            }
            ControllerKind::Api => {
                placeholders.insert("MODEL_NAME", self.model_name());
                placeholders.insert("IS_API", "true");
                "API resource controller with CRUD methods"
            }
        };

        let mut plan = ScaffoldPlan::new(root);
        plan.directory(CONTROLLER_DIR);
        plan.file(
            PathBuf::from(CONTROLLER_DIR).join(format!("{}.php", self.class_name)),
            ctx.render(self.options.kind.template(), &placeholders)?,
            description,
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

    fn options(name: &str, kind: ControllerKind) -> ControllerOptions {
        ControllerOptions {
            module: "Blog".to_string(),
            name: name.to_string(),
            kind,
            namespace: r"App\Modules".to_string(),
        }
    }

    fn blog_fs() -> MemoryFilesystem {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("modules/Blog")).unwrap();
        fs
    }

    #[test]
    fn test_kind_from_flags() {
        assert_eq!(ControllerKind::from_flags(false, false), ControllerKind::Basic);
        assert_eq!(ControllerKind::from_flags(true, false), ControllerKind::Resource);
        assert_eq!(ControllerKind::from_flags(false, true), ControllerKind::Api);
    }

    #[test]
    fn test_basic_controller() {
        let fs = blog_fs();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let generator = ControllerGenerator::new(options("post", ControllerKind::Basic)).unwrap();
        let plan = generator.plan(&ctx).unwrap();

        assert_eq!(generator.class_name(), "PostController");
        assert_eq!(
            plan.files[0].path,
            PathBuf::from("src/Http/Controllers/PostController.php")
        );
        assert!(plan.files[0].content.contains("class PostController"));
        assert!(!plan.files[0].content.contains("{{"));
    }

    #[test]
    fn test_resource_controller_derives_model() {
        let fs = blog_fs();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let generator =
            ControllerGenerator::new(options("PostsController", ControllerKind::Api)).unwrap();
        let plan = generator.plan(&ctx).unwrap();
        let content = &plan.files[0].content;

        assert_eq!(generator.class_name(), "PostsController");
        assert_eq!(generator.model_name(), "Post");
        assert!(content.contains(r"use App\Modules\Blog\Models\Post;"));
        assert!(content.contains("protected bool $api = true;"));
    }

    #[test]
    fn test_resource_flag_is_not_api() {
        let fs = blog_fs();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let plan = ControllerGenerator::new(options("Tag", ControllerKind::Resource))
            .unwrap()
            .plan(&ctx)
            .unwrap();
        assert!(plan.files[0].content.contains("protected bool $api = false;"));
    }

    #[test]
    fn test_bare_suffix_is_rejected() {
        for name in ["Controller", "controller", "ControllerController"] {
            let err = ControllerGenerator::new(options(name, ControllerKind::Api))
                .err()
                .unwrap();
            assert!(matches!(err, ScaffoldError::InvalidIdentifier { .. }), "{name}");
            assert!(err.is_precondition());
        }
    }

    #[test]
    fn test_missing_module() {
        let fs = MemoryFilesystem::new();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let err = ControllerGenerator::new(options("Post", ControllerKind::Basic))
            .unwrap()
            .plan(&ctx)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::ModuleNotFound { .. }));
    }
}
