//! Shared generator plumbing
//!
//! Every generator turns its options into a [`ScaffoldPlan`]: directories to
//! create followed by files to write. Building a plan performs no writes;
//! [`ScaffoldContext::apply`] then executes it strictly in order. A failure
//! part-way through leaves everything written so far on disk.

use std::path::{Path, PathBuf};

use super::fs::Filesystem;
use super::templates::{Placeholders, TemplateLibrary};
use crate::error::{ScaffoldError, ScaffoldResult};

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the module root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

/// Ordered directories and files produced by a generator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldPlan {
    /// Module root every relative path is joined onto
    pub root: PathBuf,
    /// Directories to create, relative to `root`
    pub directories: Vec<PathBuf>,
    /// Files to write, relative to `root`
    pub files: Vec<GeneratedFile>,
}

impl ScaffoldPlan {
    /// Empty plan rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Queue a directory
    pub fn directory(&mut self, path: impl Into<PathBuf>) {
        self.directories.push(path.into());
    }

    /// Queue a file
    pub fn file(
        &mut self,
        path: impl Into<PathBuf>,
        content: String,
        description: impl Into<String>,
    ) {
        self.files.push(GeneratedFile {
            path: path.into(),
            content,
            description: description.into(),
        });
    }

    /// Full path of `relative` under the plan root
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// Outcome of writing one plan entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEvent<'a> {
    /// A directory was created
    Directory(&'a Path),
    /// A file was written
    File(&'a GeneratedFile, &'a Path),
}

/// Everything a generator needs: filesystem, stubs and the modules root
pub struct ScaffoldContext<'a> {
    fs: &'a dyn Filesystem,
    templates: &'a TemplateLibrary,
    modules_root: PathBuf,
}

impl<'a> ScaffoldContext<'a> {
    /// Create a context writing modules under `modules_root`
    pub fn new(
        fs: &'a dyn Filesystem,
        templates: &'a TemplateLibrary,
        modules_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            templates,
            modules_root: modules_root.into(),
        }
    }

    /// Root directory of module `name`
    #[must_use]
    pub fn module_path(&self, name: &str) -> PathBuf {
        self.modules_root.join(name)
    }

    /// The injected filesystem
    #[must_use]
    pub fn fs(&self) -> &dyn Filesystem {
        self.fs
    }

    /// Render stub `name`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] if the stub cannot be resolved.
    pub fn render(&self, name: &str, placeholders: &Placeholders) -> ScaffoldResult<String> {
        self.templates.render(name, placeholders)
    }

    /// Fail unless module `name` already exists
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ModuleNotFound`] if the module directory is absent.
    pub fn require_module(&self, name: &str) -> ScaffoldResult<PathBuf> {
        let path = self.module_path(name);
        if self.fs.exists(&path) {
            Ok(path)
        } else {
            Err(ScaffoldError::ModuleNotFound {
                name: name.to_string(),
                path,
            })
        }
    }

    /// Execute `plan`, reporting each completed step to `on_write`
    ///
    /// Directories are created first, then files are written in plan order.
    /// There is no rollback: on error, earlier steps stay on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] for the first directory or file that fails.
    pub fn apply<F>(&self, plan: &ScaffoldPlan, mut on_write: F) -> ScaffoldResult<Vec<PathBuf>>
    where
        F: FnMut(WriteEvent<'_>),
    {
        let mut created = 0;
        let mut written = Vec::with_capacity(plan.files.len());

        for dir in &plan.directories {
            let path = plan.resolve(dir);
            if let Err(e) = self.fs.create_dir_all(&path) {
                warn_partial(created, written.len(), &path);
                return Err(ScaffoldError::io(&path, e));
            }
            tracing::debug!(path = %path.display(), "created directory");
            on_write(WriteEvent::Directory(&path));
            created += 1;
        }

        for file in &plan.files {
            let path = plan.resolve(&file.path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !self.fs.exists(parent) {
                    if let Err(e) = self.fs.create_dir_all(parent) {
                        warn_partial(created, written.len(), parent);
                        return Err(ScaffoldError::io(parent, e));
                    }
                }
            }

            if let Err(e) = self.fs.write(&path, &file.content) {
                warn_partial(created, written.len(), &path);
                return Err(ScaffoldError::io(&path, e));
            }

            tracing::info!(path = %path.display(), "wrote file");
            on_write(WriteEvent::File(file, &path));
            written.push(path);
        }

        Ok(written)
    }
}

fn warn_partial(directories: usize, files: usize, failed: &Path) {
    if directories + files > 0 {
        tracing::warn!(
            directories,
            files,
            failed = %failed.display(),
            "scaffolding stopped; entries already created were left in place"
        );
    }
}

/// Placeholders shared by every stub: `MODULE_NAME` and `NAMESPACE`
#[must_use]
pub fn base_placeholders(module: &str, namespace: &str) -> Placeholders {
    Placeholders::new()
        .with("MODULE_NAME", module)
        .with("NAMESPACE", namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::fs::MemoryFilesystem;

    fn sample_plan() -> ScaffoldPlan {
        let mut plan = ScaffoldPlan::new("modules/Blog");
        plan.directory("src/Models");
        plan.file("src/Models/Post.php", "one".to_string(), "model");
        plan.file("src/Models/Tag.php", "two".to_string(), "model");
        plan.file("config/blog.php", "three".to_string(), "config");
        plan
    }

    #[test]
    fn test_apply_writes_in_order() {
        let fs = MemoryFilesystem::new();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let mut events = Vec::new();
        let written = ctx
            .apply(&sample_plan(), |event| match event {
                WriteEvent::Directory(path) => events.push(format!("dir {}", path.display())),
                WriteEvent::File(_, path) => events.push(format!("file {}", path.display())),
            })
            .unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(events[0], "dir modules/Blog/src/Models");
        assert_eq!(events[1], "file modules/Blog/src/Models/Post.php");
        assert_eq!(events[3], "file modules/Blog/config/blog.php");
        assert!(fs.is_dir(Path::new("modules/Blog/config")));
    }

    #[test]
    fn test_apply_keeps_files_written_before_failure() {
        let fs = MemoryFilesystem::new();
        fs.fail_writes_to("modules/Blog/src/Models/Tag.php");
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let err = ctx.apply(&sample_plan(), |_| {}).unwrap_err();

        assert!(matches!(err, ScaffoldError::Io { .. }));
        assert!(fs.read(Path::new("modules/Blog/src/Models/Post.php")).is_some());
        assert!(fs.read(Path::new("modules/Blog/config/blog.php")).is_none());
    }

    #[test]
    fn test_apply_keeps_directories_created_before_failure() {
        let fs = MemoryFilesystem::new();
        fs.fail_writes_to("modules/Blog/config");
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let mut plan = ScaffoldPlan::new("modules/Blog");
        plan.directory("src/Models");
        plan.directory("config");
        plan.file("config/blog.php", "x".to_string(), "config");

        let mut events = 0;
        let err = ctx.apply(&plan, |_| events += 1).unwrap_err();

        assert!(matches!(
            err,
            ScaffoldError::Io { ref path, .. } if path == Path::new("modules/Blog/config")
        ));
        assert_eq!(events, 1);
        assert!(fs.is_dir(Path::new("modules/Blog/src/Models")));
        assert!(fs.files().is_empty());
    }

    #[test]
    fn test_require_module() {
        let fs = MemoryFilesystem::new();
        let templates = TemplateLibrary::builtin();
        let ctx = ScaffoldContext::new(&fs, &templates, "modules");

        let err = ctx.require_module("Blog").unwrap_err();
        assert!(matches!(err, ScaffoldError::ModuleNotFound { .. }));

        fs.create_dir_all(Path::new("modules/Blog")).unwrap();
        assert_eq!(ctx.require_module("Blog").unwrap(), PathBuf::from("modules/Blog"));
    }
}
