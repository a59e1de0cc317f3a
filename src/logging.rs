use tracing_subscriber::{fmt, EnvFilter};

/// Verbosity requested on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Install the stderr subscriber
///
/// `RUST_LOG` wins; otherwise `-v`/`-q` pick debug/error and the configured
/// level applies. Calling this twice is harmless.
pub fn init_logging(verbosity: Verbosity, configured_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, configured_level)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: Verbosity, configured_level: &str) -> String {
    match verbosity {
        Verbosity::Quiet => "error".to_string(),
        Verbosity::Verbose => "debug".to_string(),
        Verbosity::Normal if configured_level.trim().is_empty() => "warn".to_string(),
        Verbosity::Normal => configured_level.to_string(),
    }
}
