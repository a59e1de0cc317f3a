//! Cache directory commands

use crate::cache::DirectoryCacheService;
use crate::cli::args::{OutputFormat, SizeArgs};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::output;

/// Print the cache root, creating it if needed
pub fn dir<F: FileSystem>(service: &DirectoryCacheService<F>, format: OutputFormat) -> Result<String> {
    let root = service.resolve_root()?;
    output::format_directory(&root, format)
}

/// Print the cache size
pub fn size<F: FileSystem>(
    service: &DirectoryCacheService<F>,
    args: &SizeArgs,
    format: OutputFormat,
) -> Result<String> {
    let bytes = service.compute_size()?;
    if args.bytes {
        return Ok(bytes.to_string());
    }
    output::format_size(&service.root_path(), bytes, format)
}

/// Remove the cache root
pub fn clear<F: FileSystem>(service: &DirectoryCacheService<F>, format: OutputFormat) -> Result<String> {
    let summary = service.clear()?;
    output::format_cleared(&service.root_path(), &summary, format)
}
