use std::path::Path;

use colored::Colorize;

use crate::cache::ClearSummary;

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count using binary units
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Format the cache root for pretty output
pub fn format_directory(path: &Path) -> String {
    format!("{} {}", "Cache directory:".cyan(), path.display())
}

/// Format a size measurement for pretty output
pub fn format_size(path: &Path, bytes: u64) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Size".bold()));
    output.push_str(&format!("  {} {}\n", "Location:".cyan(), path.display()));
    if bytes == 0 {
        output.push_str(&format!("  {} {}", "Size:".cyan(), "empty".dimmed()));
    } else {
        output.push_str(&format!(
            "  {} {} ({} bytes)",
            "Size:".cyan(),
            format_bytes(bytes).bold(),
            bytes
        ));
    }
    output
}

/// Format a clear summary for pretty output
pub fn format_cleared(path: &Path, summary: &ClearSummary) -> String {
    if summary.entries_removed() == 0 {
        return format!(
            "{} Cache already empty ({})",
            "✓".green(),
            path.display().to_string().dimmed()
        );
    }

    let mut output = format!("{} Cache cleared\n", "✓".green());
    output.push_str(&format!(
        "  {} {} files, {} directories",
        "Removed:".cyan(),
        summary.files_removed,
        summary.dirs_removed
    ));
    if summary.links_removed > 0 {
        output.push_str(&format!(", {} links", summary.links_removed));
    }
    output.push('\n');
    output.push_str(&format!(
        "  {} {}",
        "Freed:".cyan(),
        format_bytes(summary.bytes_freed)
    ));
    output
}
