use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;

use plato_cache_manager::cache::DirectoryCacheService;
use plato_cache_manager::channel::MethodChannel;
use plato_cache_manager::cli::args::{Cli, Commands, CompletionsArgs, OutputFormat};
use plato_cache_manager::cli::commands;
use plato_cache_manager::config::Config;
use plato_cache_manager::error::CacheError;
use plato_cache_manager::logging::init_logging;
use plato_cache_manager::platform::PlatformInfo;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), CacheError> {
    let cli = Cli::parse();

    // Handle completions command early (no config needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let mut config = Config::load()?;
    init_logging(cli.verbosity(), &config.log.level);
    let format = cli
        .output
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

    // Commands that don't touch the cache root
    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => commands::config(&mut config, args, format)?,
        Commands::Platform => commands::platform(format)?,
        Commands::Call(args) => {
            // getPlatformVersion and unknown methods answer even without a cache root
            let platform = PlatformInfo::detect();
            let channel = match DirectoryCacheService::from_config(&config, cli.base_dir.clone()) {
                Ok(service) => MethodChannel::new(service, platform),
                Err(e) => MethodChannel::unavailable(e, platform),
            };
            commands::call(&channel, args)?
        }

        _ => {
            let service = DirectoryCacheService::from_config(&config, cli.base_dir.clone())?;

            match &cli.command {
                Commands::Dir => commands::dir(&service, format)?,
                Commands::Size(args) => commands::size(&service, args, format)?,
                Commands::Clear => commands::clear(&service, format)?,
                Commands::Config(_)
                | Commands::Platform
                | Commands::Call(_)
                | Commands::Completions(_) => {
                    unreachable!()
                }
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
