use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::paths::Paths;
use crate::cache::DEFAULT_DIR_NAME;
use crate::error::{CacheError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Cache location
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging preferences
    #[serde(default)]
    pub log: LogConfig,
}

/// Where the cache root lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Base cache directory; the platform default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Name of the cache root under the base directory
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
}

fn default_dir_name() -> String {
    DEFAULT_DIR_NAME.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            dir_name: default_dir_name(),
        }
    }
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Keys accepted by `Config::set`
pub const CONFIG_KEYS: &[&str] = &["cache.base_dir", "cache.dir_name", "output.format", "log.level"];

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let paths = Paths::new()?;
        Self::load_from(&paths)
    }

    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, contents)?;
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        validate_dir_name(&self.cache.dir_name)?;
        if self.output.format != "pretty" && self.output.format != "json" {
            return Err(CacheError::config(
                "output.format must be 'pretty' or 'json'",
            ));
        }
        Ok(())
    }

    /// Set a value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "cache.base_dir" => {
                self.cache.base_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "cache.dir_name" => {
                validate_dir_name(value)?;
                self.cache.dir_name = value.to_string();
            }
            "output.format" => {
                if value != "pretty" && value != "json" {
                    return Err(CacheError::InvalidArgument(
                        "output.format must be 'pretty' or 'json'".to_string(),
                    ));
                }
                self.output.format = value.to_string();
            }
            "log.level" => {
                self.log.level = value.to_string();
            }
            _ => {
                return Err(CacheError::InvalidArgument(format!(
                    "Unknown config key: {}. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// The cache root name must be exactly one ordinary path component
fn validate_dir_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == name => Ok(()),
        _ => Err(CacheError::config(format!(
            "cache.dir_name must be a single directory name, got '{}'",
            name
        ))),
    }
}
