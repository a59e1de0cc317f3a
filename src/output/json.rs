use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::cache::ClearSummary;
use crate::error::Result;
use crate::platform::PlatformInfo;

/// Format the cache root as JSON
pub fn format_directory(path: &Path) -> Result<String> {
    format_json(&json!({ "path": path.to_string_lossy() }))
}

/// Format a size measurement as JSON
pub fn format_size(path: &Path, bytes: u64) -> Result<String> {
    format_json(&json!({
        "path": path.to_string_lossy(),
        "bytes": bytes,
    }))
}

/// Format a clear summary as JSON
pub fn format_cleared(path: &Path, summary: &ClearSummary) -> Result<String> {
    format_json(&json!({
        "status": "cleared",
        "path": path.to_string_lossy(),
        "removed": summary,
    }))
}

/// Format platform info as JSON
pub fn format_platform(info: &PlatformInfo) -> Result<String> {
    format_json(&json!({
        "name": info.name,
        "version": info.version,
        "display": info.to_string(),
    }))
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
