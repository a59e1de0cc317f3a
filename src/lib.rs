//! Manage the `plato_jobs_cache` directory beneath the platform cache base.
//!
//! [`cache::DirectoryCacheService`] resolves, measures and clears the cache
//! root through the [`fs::FileSystem`] trait. [`channel::MethodChannel`]
//! exposes the same operations as named method calls for an application
//! shell.

pub mod cache;
pub mod channel;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod output;
pub mod platform;

pub use cache::{ClearSummary, DirectoryCacheService};
pub use channel::{MethodCall, MethodChannel, MethodResponse};
pub use error::{CacheError, Result};
