//! Depth-first walk shared by size computation and deletion
//!
//! Links are never followed: they count as zero bytes and are unlinked on
//! removal. An entry that disappears between being listed and being visited
//! is treated as already gone. Any other I/O failure stops the walk.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::fs::{EntryKind, FileSystem};

/// Where and why a walk stopped
#[derive(Debug)]
pub struct TraversalError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl TraversalError {
    fn at(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A deletion that stopped midway, with what it managed to remove
#[derive(Debug)]
pub struct PartialRemoval {
    pub error: TraversalError,
    pub removed: ClearSummary,
}

/// What a deletion removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearSummary {
    pub files_removed: u64,
    pub dirs_removed: u64,
    pub links_removed: u64,
    pub bytes_freed: u64,
}

impl ClearSummary {
    /// Total number of filesystem entries removed
    pub fn entries_removed(&self) -> u64 {
        self.files_removed + self.dirs_removed + self.links_removed
    }
}

/// Sum the lengths of all regular files at or below `path`
///
/// Returns 0 when `path` does not exist.
pub fn directory_size<F: FileSystem>(fs: &F, path: &Path) -> Result<u64, TraversalError> {
    let kind = fs.entry_kind(path).map_err(TraversalError::at(path))?;
    match kind {
        None | Some(EntryKind::Symlink) => Ok(0),
        Some(EntryKind::File { len }) => Ok(len),
        Some(EntryKind::Dir) => {
            let mut total: u64 = 0;
            for child in list_children(fs, path)? {
                total = total.saturating_add(directory_size(fs, &child)?);
            }
            Ok(total)
        }
    }
}

/// Delete `path` and everything below it, children before parents
///
/// Succeeds with an empty summary when `path` does not exist.
pub fn remove_tree<F: FileSystem>(fs: &F, path: &Path) -> Result<ClearSummary, PartialRemoval> {
    let mut summary = ClearSummary::default();
    match remove_entry(fs, path, &mut summary) {
        Ok(()) => Ok(summary),
        Err(error) => Err(PartialRemoval {
            error,
            removed: summary,
        }),
    }
}

fn remove_entry<F: FileSystem>(
    fs: &F,
    path: &Path,
    summary: &mut ClearSummary,
) -> Result<(), TraversalError> {
    let kind = fs.entry_kind(path).map_err(TraversalError::at(path))?;
    match kind {
        None => {}
        Some(EntryKind::File { len }) => {
            if removed(fs.remove_file(path)).map_err(TraversalError::at(path))? {
                summary.files_removed += 1;
                summary.bytes_freed = summary.bytes_freed.saturating_add(len);
            }
        }
        Some(EntryKind::Symlink) => {
            if removed(fs.remove_file(path)).map_err(TraversalError::at(path))? {
                summary.links_removed += 1;
            }
        }
        Some(EntryKind::Dir) => {
            for child in list_children(fs, path)? {
                remove_entry(fs, &child, summary)?;
            }
            if removed(fs.remove_dir(path)).map_err(TraversalError::at(path))? {
                summary.dirs_removed += 1;
            }
        }
    }
    Ok(())
}

fn list_children<F: FileSystem>(fs: &F, path: &Path) -> Result<Vec<PathBuf>, TraversalError> {
    match fs.list_dir(path) {
        Ok(children) => Ok(children),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(TraversalError::at(path)(e)),
    }
}

/// `Ok(false)` when the entry was already gone
fn removed(result: io::Result<()>) -> io::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
