use std::io;
use std::path::{Path, PathBuf};

use super::traverse::{directory_size, remove_tree, ClearSummary};
use super::DEFAULT_DIR_NAME;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fs::{EntryKind, FileSystem, OsFileSystem};
use crate::platform;

/// Owns the location of the cache root and the three operations on it
///
/// Nothing is remembered between calls: the root path is rebuilt from the
/// base directory every time and each operation walks the tree afresh.
#[derive(Debug, Clone)]
pub struct DirectoryCacheService<F = OsFileSystem> {
    fs: F,
    base_dir: PathBuf,
    dir_name: String,
}

impl DirectoryCacheService<OsFileSystem> {
    /// Build a service on the real filesystem
    ///
    /// The base directory comes from `base_override`, then `cache.base_dir`
    /// in the config, then the platform default.
    pub fn from_config(config: &Config, base_override: Option<PathBuf>) -> Result<Self> {
        let base = base_override
            .or_else(|| config.cache.base_dir.clone())
            .or_else(platform::base_cache_dir)
            .ok_or(CacheError::NoBaseDir)?;
        let base = if base.is_absolute() {
            base
        } else {
            let cwd = std::env::current_dir().map_err(|source| CacheError::ResolveRoot {
                path: base.clone(),
                source,
            })?;
            cwd.join(base)
        };

        config.validate()?;
        Ok(Self::new(OsFileSystem, base).with_dir_name(config.cache.dir_name.clone()))
    }
}

impl<F: FileSystem> DirectoryCacheService<F> {
    /// Service rooted at `<base_dir>/plato_jobs_cache`
    pub fn new(fs: F, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            base_dir: base_dir.into(),
            dir_name: DEFAULT_DIR_NAME.to_string(),
        }
    }

    /// Use a different name for the cache root
    pub fn with_dir_name(mut self, dir_name: impl Into<String>) -> Self {
        self.dir_name = dir_name.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the cache root. Does not touch the filesystem.
    pub fn root_path(&self) -> PathBuf {
        self.base_dir.join(&self.dir_name)
    }

    /// Return the cache root, creating it and missing ancestors if needed
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let root = self.root_path();
        let fail = |source| CacheError::ResolveRoot {
            path: root.clone(),
            source,
        };

        match self.fs.entry_kind(&root).map_err(fail)? {
            Some(EntryKind::Dir) => {}
            Some(_) => {
                return Err(fail(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "cache root exists and is not a directory",
                )))
            }
            None => {
                tracing::debug!(path = %root.display(), "Creating cache root");
                self.fs.create_dir_all(&root).map_err(fail)?;
            }
        }

        Ok(root)
    }

    /// Total bytes of regular files under the cache root
    ///
    /// 0 when the root is absent or is not a real directory.
    pub fn compute_size(&self) -> Result<u64> {
        let root = self.root_path();
        let kind = self.fs.entry_kind(&root).map_err(|source| CacheError::Size {
            path: root.clone(),
            source,
        })?;
        if kind != Some(EntryKind::Dir) {
            tracing::debug!(path = %root.display(), ?kind, "Cache root is not a directory");
            return Ok(0);
        }

        let size = directory_size(&self.fs, &root).map_err(|e| CacheError::Size {
            path: e.path,
            source: e.source,
        })?;

        tracing::debug!(path = %root.display(), bytes = size, "Computed cache size");
        Ok(size)
    }

    /// Remove the cache root and everything in it; a missing root is a no-op
    pub fn clear(&self) -> Result<ClearSummary> {
        let root = self.root_path();
        match remove_tree(&self.fs, &root) {
            Ok(summary) => {
                tracing::debug!(
                    path = %root.display(),
                    entries = summary.entries_removed(),
                    bytes = summary.bytes_freed,
                    "Cleared cache"
                );
                Ok(summary)
            }
            Err(partial) if partial.removed.entries_removed() == 0 => Err(CacheError::Clear {
                path: partial.error.path,
                source: partial.error.source,
            }),
            Err(partial) => {
                tracing::warn!(
                    path = %partial.error.path.display(),
                    removed = partial.removed.entries_removed(),
                    "Cache clear stopped midway; tree left partially removed"
                );
                Err(CacheError::PartialClear {
                    path: partial.error.path,
                    removed: partial.removed.entries_removed(),
                    source: partial.error.source,
                })
            }
        }
    }
}
