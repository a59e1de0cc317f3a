use std::fs;
use std::path::PathBuf;

use crate::error::{CacheError, Result};

/// Name of the configuration directory under the user's home
const CONFIG_DIR_NAME: &str = ".plato_jobs";

/// Manages paths for the cache manager's own configuration
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.plato_jobs)
    pub root: PathBuf,
    /// Configuration file path (~/.plato_jobs/config.toml)
    pub config_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CacheError::config("could not determine home directory"))?;
        Ok(Self::under(home.join(CONFIG_DIR_NAME)))
    }

    /// Paths rooted at an explicit configuration directory
    pub fn under(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.toml"),
            root,
        }
    }

    /// Ensure the configuration directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}
