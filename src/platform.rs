//! Platform identity and per-user cache base directory

use std::fmt;
use std::path::PathBuf;

/// Per-user cache directory for the current platform
///
/// Possible values by OS are:
/// * Linux: `$XDG_CACHE_HOME` or `~/.cache`
/// * Mac: `~/Library/Caches`
/// * Windows: `C:/Users/<user>/AppData/Local`
///
/// `None` on platforms without one.
pub fn base_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir()
}

/// Platform display name and version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub name: String,
    pub version: String,
}

impl PlatformInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Describe the platform this binary was built for and is running on
    pub fn detect() -> Self {
        Self::new(display_name(std::env::consts::OS), os_release())
    }
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

fn display_name(os: &str) -> String {
    match os {
        "android" => "Android",
        "ios" => "iOS",
        "linux" => "Linux",
        "macos" => "macOS",
        "windows" => "Windows",
        other => other,
    }
    .to_string()
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn os_release() -> String {
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|s| s.trim().to_string())
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn os_release() -> String {
    "unknown".to_string()
}
