use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::output;
use crate::platform::PlatformInfo;

/// Show platform name and version
pub fn platform(format: OutputFormat) -> Result<String> {
    output::format_platform(&PlatformInfo::detect(), format)
}
