//! `make-module-migration`: timestamped migrations inside an existing module

use chrono::NaiveDateTime;
use std::path::PathBuf;

use super::generator::{base_placeholders, ScaffoldContext, ScaffoldPlan};
use super::helpers::{NameForm, TemplateHelpers};
use crate::error::ScaffoldResult;

const MIGRATION_DIR: &str = "src/Database/Migrations";

/// Second-resolution prefix; lexicographic order matches chronological order
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// What the migration does to its table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MigrationTable {
    /// Create a new table (`--create`)
    Create(String),
    /// Alter an existing table (`--table`)
    Modify(String),
    /// Empty `up`/`down` bodies
    #[default]
    Generic,
}

impl MigrationTable {
    /// Pick the variant from the `--create` / `--table` options, `--create` winning
    ///
    /// An empty table name counts as absent.
    #[must_use]
    pub fn from_options(create: Option<String>, table: Option<String>) -> Self {
        let present = |value: Option<String>| value.filter(|table| !table.is_empty());
        match (present(create), present(table)) {
            (Some(table), _) => Self::Create(table),
            (None, Some(table)) => Self::Modify(table),
            (None, None) => Self::Generic,
        }
    }

    /// Stub used for this variant
    #[must_use]
    pub const fn template(&self) -> &'static str {
        match self {
            Self::Create(_) => "migration-create",
            Self::Modify(_) => "migration-modify",
            Self::Generic => "migration-generic",
        }
    }

    /// Table the migration targets, if any
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Create(table) | Self::Modify(table) => Some(table.as_str()),
            Self::Generic => None,
        }
    }
}

/// Options for `make-module-migration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Target module
    pub module: String,
    /// Migration name, e.g. `create_posts_table`
    pub name: String,
    /// Table variant
    pub table: MigrationTable,
    /// Root namespace
    pub namespace: String,
    /// Timestamp used for the file prefix
    pub created_at: NaiveDateTime,
}

/// Generator for module migrations
pub struct MigrationGenerator {
    options: MigrationOptions,
}

impl MigrationGenerator {
    /// Create a generator for `options`
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScaffoldError::InvalidIdentifier`] for unusable names.
    pub fn new(options: MigrationOptions) -> ScaffoldResult<Self> {
        NameForm::derive(&options.module)?;
        NameForm::derive(&options.name)?;
        Ok(Self { options })
    }

    /// File name, `<timestamp>_<name>.php`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.php",
            self.options.created_at.format(TIMESTAMP_FORMAT),
            self.options.name
        )
    }

    /// Class-cased migration name
    #[must_use]
    pub fn class_name(&self) -> String {
        TemplateHelpers::to_migration_class(&self.options.name)
    }

    /// Build the plan for the migration
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScaffoldError::ModuleNotFound`] if the module
    /// does not exist, or a template error.
    pub fn plan(&self, ctx: &ScaffoldContext<'_>) -> ScaffoldResult<ScaffoldPlan> {
        let root = ctx.require_module(&self.options.module)?;

        let mut placeholders = base_placeholders(&self.options.module, &self.options.namespace);
        placeholders.insert("CLASS_NAME", self.class_name());
        if let Some(table) = self.options.table.table() {
            placeholders.insert("TABLE_NAME", table);
        }

        let mut plan = ScaffoldPlan::new(root);
        plan.directory(MIGRATION_DIR);
        plan.file(
            PathBuf::from(MIGRATION_DIR).join(self.file_name()),
            ctx.render(self.options.table.template(), &placeholders)?,
            "migration",
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use crate::scaffold::fs::{Filesystem, MemoryFilesystem};
    use crate::scaffold::templates::TemplateLibrary;
    use chrono::NaiveDate;
    use std::path::Path;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn options(name: &str, table: MigrationTable, created_at: NaiveDateTime) -> MigrationOptions {
        MigrationOptions {
            module: "Blog".to_string(),
            name: name.to_string(),
            table,
            namespace: r"App\Modules".to_string(),
            created_at,
        }
    }

    fn blog_fs() -> MemoryFilesystem {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("modules/Blog")).unwrap();
        fs
    }

    #[test]
    fn test_table_from_options() {
        assert_eq!(
            MigrationTable::from_options(Some("posts".into()), None),
            MigrationTable::Create("posts".into())
        );
        assert_eq!(
            MigrationTable::from_options(None, Some("posts".into())),
            MigrationTable::Modify("posts".into())
        );
        assert_eq!(MigrationTable::from_options(None, None), MigrationTable::Generic);
    }

    #[test]
    fn test_empty_table_names_are_ignored() {
        assert_eq!(
            MigrationTable::from_options(Some(String::new()), None),
            MigrationTable::Generic
        );
        assert_eq!(
            MigrationTable::from_options(None, Some(String::new())),
            MigrationTable::Generic
        );
        assert_eq!(
            MigrationTable::from_options(Some(String::new()), Some("posts".into())),
            MigrationTable::Modify("posts".into())
        );
    }

    #[test]
    fn test_generic_variant() {
        let fs = blog_fs();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let plan = MigrationGenerator::new(options(
            "backfill_post_slugs",
            MigrationTable::Generic,
            at(12, 0, 0),
        ))
        .unwrap()
        .plan(&ctx)
        .unwrap();

        let content = &plan.files[0].content;
        assert!(content.contains("BackfillPostSlugs"));
        assert!(!content.contains("Schema::"));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn test_file_name_is_timestamped() {
        let generator = MigrationGenerator::new(options(
            "create_posts_table",
            MigrationTable::Generic,
            at(7, 5, 3),
        ))
        .unwrap();
        assert_eq!(generator.file_name(), "2024_03_09_070503_create_posts_table.php");
        assert_eq!(generator.class_name(), "CreatePostsTable");
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let earlier = MigrationGenerator::new(options("b", MigrationTable::Generic, at(9, 59, 59)))
            .unwrap()
            .file_name();
        let later = MigrationGenerator::new(options("a", MigrationTable::Generic, at(10, 0, 0)))
            .unwrap()
            .file_name();
        assert!(earlier < later);
    }

    #[test]
    fn test_create_variant() {
        let fs = blog_fs();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let plan = MigrationGenerator::new(options(
            "create_posts_table",
            MigrationTable::Create("posts".into()),
            at(12, 0, 0),
        ))
        .unwrap()
        .plan(&ctx)
        .unwrap();

        let file = &plan.files[0];
        assert!(file.path.starts_with("src/Database/Migrations"));
        assert!(file.content.contains("Schema::create('posts'"));
        assert!(file.content.contains("Schema::dropIfExists('posts')"));
    }

    #[test]
    fn test_modify_variant() {
        let fs = blog_fs();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let plan = MigrationGenerator::new(options(
            "add_slug_to_posts",
            MigrationTable::Modify("posts".into()),
            at(12, 0, 0),
        ))
        .unwrap()
        .plan(&ctx)
        .unwrap();

        assert!(plan.files[0].content.contains("Schema::table('posts'"));
        assert!(!plan.files[0].content.contains("Schema::create"));
    }

    #[test]
    fn test_missing_module() {
        let fs = MemoryFilesystem::new();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let err = MigrationGenerator::new(options("x", MigrationTable::Generic, at(0, 0, 0)))
            .unwrap()
            .plan(&ctx)
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::ModuleNotFound { .. }));
    }
}
