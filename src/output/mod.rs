pub mod json;
pub mod pretty;

use std::path::Path;

use crate::cache::ClearSummary;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::platform::PlatformInfo;

/// Format the cache root location
pub fn format_directory(path: &Path, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_directory(path)),
        OutputFormat::Json => json::format_directory(path),
    }
}

/// Format a cache size measurement
pub fn format_size(path: &Path, bytes: u64, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_size(path, bytes)),
        OutputFormat::Json => json::format_size(path, bytes),
    }
}

/// Format the result of clearing the cache
pub fn format_cleared(path: &Path, summary: &ClearSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cleared(path, summary)),
        OutputFormat::Json => json::format_cleared(path, summary),
    }
}

/// Format platform name and version
pub fn format_platform(info: &PlatformInfo, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(info.to_string()),
        OutputFormat::Json => json::format_platform(info),
    }
}
