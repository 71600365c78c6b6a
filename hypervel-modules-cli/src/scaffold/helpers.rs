//! Naming helpers for code generation
//!
//! Class names, table names and file names are all derived from the raw
//! identifier the user typed. The rules here are deliberately simple suffix
//! rules rather than full English inflection, so the output is predictable:
//! `Tags` always becomes `Tag`, even though `Glass` becomes `Glas`.

use crate::error::{ScaffoldError, ScaffoldResult};

const CONTROLLER_SUFFIX: &str = "Controller";

/// Name variants derived from a user-supplied identifier
///
/// # Examples
///
/// ```
/// # use hypervel_modules::scaffold::helpers::NameForm;
/// let names = NameForm::derive("Posts").unwrap();
/// assert_eq!(names.singular(), "Post");
/// assert_eq!(names.table_name(), "posts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameForm {
    raw: String,
    singular: String,
    plural: String,
    class_cased: String,
    table_name: String,
}

impl NameForm {
    /// Derive every name variant from `raw`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidIdentifier`] if `raw` is empty or
    /// cannot be used as a single path segment.
    pub fn derive(raw: &str) -> ScaffoldResult<Self> {
        validate_identifier(raw)?;

        let singular = TemplateHelpers::singularize(raw);
        let singular_class = TemplateHelpers::capitalize(&singular);

        Ok(Self {
            raw: raw.to_string(),
            plural: TemplateHelpers::pluralize(&singular),
            class_cased: TemplateHelpers::capitalize(raw),
            table_name: TemplateHelpers::to_table_name(&singular_class),
            singular,
        })
    }

    /// The identifier exactly as supplied
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Identifier with at most one trailing `s` removed
    #[must_use]
    pub fn singular(&self) -> &str {
        &self.singular
    }

    /// Pluralized singular form, case preserved
    #[must_use]
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Identifier with its first character uppercased
    #[must_use]
    pub fn class_cased(&self) -> &str {
        &self.class_cased
    }

    /// Lowercase plural used for database tables
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Class-cased singular, used for model class names
    #[must_use]
    pub fn singular_class(&self) -> String {
        TemplateHelpers::capitalize(&self.singular)
    }
}

fn validate_identifier(raw: &str) -> ScaffoldResult<()> {
    let reason = if raw.trim().is_empty() {
        Some("name must not be empty")
    } else if raw == "." || raw == ".." {
        Some("name must not be a relative path component")
    } else if raw.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(ScaffoldError::InvalidIdentifier {
            value: raw.to_string(),
            reason,
        })
    })
}

/// Template helpers for stub code generation
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Uppercase the first character, leaving the rest untouched
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypervel_modules::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::capitalize("userProfile"), "UserProfile");
    /// assert_eq!(TemplateHelpers::capitalize("HTTP"), "HTTP");
    /// ```
    #[must_use]
    pub fn capitalize(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Strip a single trailing `s` from words longer than one character
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypervel_modules::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::singularize("Posts"), "Post");
    /// assert_eq!(TemplateHelpers::singularize("Address"), "Addres");
    /// assert_eq!(TemplateHelpers::singularize("s"), "s");
    /// ```
    #[must_use]
    pub fn singularize(input: &str) -> String {
        if input.chars().count() > 1 {
            if let Some(stem) = input.strip_suffix('s') {
                return stem.to_string();
            }
        }
        input.to_string()
    }

    /// Pluralize a word using suffix rules
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypervel_modules::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::pluralize("category"), "categories");
    /// assert_eq!(TemplateHelpers::pluralize("Box"), "Boxes");
    /// assert_eq!(TemplateHelpers::pluralize("post"), "posts");
    /// ```
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        if let Some(stem) = input.strip_suffix('y') {
            return format!("{stem}ies");
        }

        if ["s", "sh", "ch", "x", "z"]
            .iter()
            .any(|suffix| input.ends_with(suffix))
        {
            format!("{input}es")
        } else {
            format!("{input}s")
        }
    }

    /// Convert a class name to its table name (lowercase plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypervel_modules::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_table_name("Category"), "categories");
    /// assert_eq!(TemplateHelpers::to_table_name("Class"), "classes");
    /// ```
    #[must_use]
    pub fn to_table_name(class_name: &str) -> String {
        Self::pluralize(&class_name.to_lowercase())
    }

    /// Normalize a controller name to `<Name>Controller`
    ///
    /// Any trailing `Controller` suffix is removed before it is appended
    /// again, so applying this twice gives the same result.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypervel_modules::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_controller_class("post"), "PostController");
    /// assert_eq!(TemplateHelpers::to_controller_class("PostController"), "PostController");
    /// ```
    #[must_use]
    pub fn to_controller_class(name: &str) -> String {
        let class = Self::capitalize(name);
        format!("{}{CONTROLLER_SUFFIX}", Self::strip_controller_suffix(&class))
    }

    /// Remove every trailing `Controller` suffix
    #[must_use]
    pub fn strip_controller_suffix(name: &str) -> &str {
        let mut stem = name;
        while let Some(rest) = stem.strip_suffix(CONTROLLER_SUFFIX) {
            stem = rest;
        }
        stem
    }

    /// Convert a `snake_case` migration name to its class name
    ///
    /// Each `_`-separated word gets its first character uppercased and the rest
    /// kept as typed, so `create_2fa_table` becomes `Create2faTable`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypervel_modules::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_migration_class("create_tags_table"), "CreateTagsTable");
    /// ```
    #[must_use]
    pub fn to_migration_class(name: &str) -> String {
        name.split('_').map(Self::capitalize).collect()
    }

    /// Config file stem for a module (`Posts` -> `posts`)
    #[must_use]
    pub fn to_config_name(module: &str) -> String {
        module.to_lowercase()
    }
}
