use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for cache manager operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Wire code shared by every cache operation failure
pub const CACHE_ERROR: &str = "CACHE_ERROR";

/// Errors that can occur during cache manager operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache root could not be created or is not a directory
    #[error("Failed to get cache directory {}: {source}", path.display())]
    ResolveRoot { path: PathBuf, source: io::Error },

    /// Walking the cache tree failed
    #[error("Failed to get cache size at {}: {source}", path.display())]
    Size { path: PathBuf, source: io::Error },

    /// Deletion failed before anything was removed
    #[error("Failed to clear cache at {}: {source}", path.display())]
    Clear { path: PathBuf, source: io::Error },

    /// Deletion failed after some entries were already removed
    #[error(
        "Cache partially cleared ({removed} entries removed), failed at {}: {source}",
        path.display()
    )]
    PartialClear {
        path: PathBuf,
        removed: u64,
        source: io::Error,
    },

    /// The platform offers no per-user cache directory
    #[error("No base cache directory available on this platform. Pass --base-dir or set cache.base_dir.")]
    NoBaseDir,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON encoding or decoding error
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error outside of a cache operation
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CacheError {
    /// Short machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::ResolveRoot { .. }
            | Self::Size { .. }
            | Self::Clear { .. }
            | Self::PartialClear { .. }
            | Self::NoBaseDir => CACHE_ERROR,
            Self::Config(_) | Self::Toml(_) | Self::TomlSerialize(_) => "CONFIG_ERROR",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Json(_) => "ENCODING_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Operation-level message, without the underlying cause
    pub fn message(&self) -> String {
        match self {
            Self::ResolveRoot { .. } | Self::NoBaseDir => "Failed to get cache directory".to_string(),
            Self::Size { .. } => "Failed to get cache size".to_string(),
            Self::Clear { .. } => "Failed to clear cache".to_string(),
            Self::PartialClear { .. } => "Cache partially cleared".to_string(),
            other => other.to_string(),
        }
    }

    /// Underlying cause reported by the OS, if any
    pub fn details(&self) -> Option<String> {
        match self {
            Self::ResolveRoot { source, .. }
            | Self::Size { source, .. }
            | Self::Clear { source, .. }
            | Self::PartialClear { source, .. } => Some(source.to_string()),
            Self::NoBaseDir => Some("no per-user cache directory".to_string()),
            _ => None,
        }
    }

    /// True when a clear stopped midway and left part of the tree behind
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartialClear { .. })
    }

    /// Process exit status for the CLI
    pub fn exit_code(&self) -> i32 {
        match self.code() {
            CACHE_ERROR | "IO_ERROR" | "ENCODING_ERROR" => 1,
            _ => 2,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
