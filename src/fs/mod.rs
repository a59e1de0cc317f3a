//! Filesystem capability used by the cache traversal
//!
//! The traversal only needs to stat, list, create and remove. It runs
//! unchanged over the real disk (`OsFileSystem`) or, in unit tests, over an
//! in-memory tree with injected failures.

#[cfg(test)]
mod memory;
mod os;

#[cfg(test)]
pub use memory::{ListOrder, MemoryFileSystem};
pub use os::OsFileSystem;

use std::io;
use std::path::{Path, PathBuf};

/// What a path points at, as seen without following links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file with its byte length
    File { len: u64 },
    /// Directory
    Dir,
    /// Symbolic link (never followed)
    Symlink,
}

/// Minimal filesystem operations needed to manage the cache tree
pub trait FileSystem {
    /// Stat `path` without following links. `Ok(None)` if nothing is there.
    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    /// Full paths of the direct children of a directory, in no particular order
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create a directory and any missing ancestors
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file or a symbolic link
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        (**self).entry_kind(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        (**self).remove_dir(path)
    }
}
