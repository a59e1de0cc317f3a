use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::logging::Verbosity;

/// Locate, measure and clear the plato_jobs cache directory
#[derive(Parser)]
#[command(name = "plato-cache")]
#[command(version, propagate_version = true)]
#[command(about = "Locate, measure and clear the plato_jobs cache directory")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Base cache directory (overrides config and platform default)
    #[arg(long, env = "PLATO_CACHE_BASE_DIR", global = true)]
    pub base_dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    /// Write shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value, falling back to pretty
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the cache directory, creating it if needed
    #[command(alias = "d")]
    Dir,

    /// Show the total size of the cache
    #[command(alias = "s")]
    Size(SizeArgs),

    /// Delete the cache directory and everything in it
    Clear,

    /// Show platform name and version
    Platform,

    /// Invoke a channel method and print the response envelope
    Call(CallArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the size command
#[derive(Args)]
pub struct SizeArgs {
    /// Print only the byte count
    #[arg(short, long)]
    pub bytes: bool,
}

/// Arguments for the call command
#[derive(Args)]
pub struct CallArgs {
    /// Method name, e.g. getCacheSize
    pub method: String,

    /// JSON arguments passed with the call
    #[arg(long, value_name = "JSON")]
    pub args: Option<String>,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.base_dir)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
