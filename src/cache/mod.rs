//! The managed cache root and the operations on it
//!
//! The root is a single directory treated as an opaque subtree: it is created
//! on demand, measured by walking it, and removed wholesale.

mod service;
mod traverse;

pub use service::DirectoryCacheService;
pub use traverse::{directory_size, remove_tree, ClearSummary, PartialRemoval, TraversalError};

/// Name of the cache root under the platform base cache directory
pub const DEFAULT_DIR_NAME: &str = "plato_jobs_cache";
