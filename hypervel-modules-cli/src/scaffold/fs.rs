//! Filesystem access for generators
//!
//! Generators never touch `std::fs` directly. They receive a [`Filesystem`]
//! so tests can run against [`MemoryFilesystem`] and inject write failures.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// The three filesystem operations scaffolding needs
pub trait Filesystem {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// In-memory filesystem for tests
///
/// Paths are stored verbatim, so callers should use consistent roots.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, String>>,
    fail_on: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFilesystem {
    /// Create an empty filesystem
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writing or creating `path` fail with `PermissionDenied`
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.fail_on.borrow_mut().insert(path.into());
    }

    /// Contents of the file at `path`, if it has been written
    #[must_use]
    pub fn read(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Every written file path, sorted
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    /// Whether `path` was created as a directory
    #[must_use]
    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path) || self.files.borrow().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.fail_on.borrow().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("mkdir {} refused", path.display()),
            ));
        }
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.fail_on.borrow().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {} refused", path.display()),
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
