//! pomon - price oracle miss monitor
//!
//! A command-line daemon that watches validator oracle miss counters and
//! alerts on Discord and PagerDuty.

use clap::Parser;
use pomon::cli::args::{generate_completions, Cli, Commands, ConfigCommands, RunArgs};
use pomon::commands::{resolve_config, run_check, run_config_show, run_config_validate, run_monitor};
use pomon::error::{AppError, ConfigError};

/// Log filter used when RUST_LOG is unset
const DEFAULT_FILTER: &str = "warn,pomon=debug";

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; without RUST_LOG the crate filter is opened up and
    // the effective level is chosen with the global max level
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .init();

    if let Some(level) = max_log_level(cli.verbose, rust_log.as_deref()) {
        log::set_max_level(level);
    }

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

/// Global level cap to apply after logger init
///
/// `--verbose` always opens debug output. Otherwise an explicit RUST_LOG is
/// left in charge and the default filter is capped at info.
fn max_log_level(verbose: bool, rust_log: Option<&str>) -> Option<log::LevelFilter> {
    if verbose {
        Some(log::LevelFilter::Debug)
    } else if rust_log.is_some_and(|filter| !filter.trim().is_empty()) {
        None
    } else {
        Some(log::LevelFilter::Info)
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Run(args) => {
            let config = resolve_config(cli, args)?;
            if config.general.verbose {
                log::set_max_level(log::LevelFilter::Debug);
            }
            run_monitor(args, &config)
        }

        Commands::Check => {
            let config = resolve_config(cli, &RunArgs::default())?;
            run_check(&config, cli.format)
        }

        Commands::Config(args) => match &args.command {
            ConfigCommands::Show(run_args) => {
                let config = resolve_config(cli, run_args)?;
                run_config_show(&config, cli.format)
            }
            ConfigCommands::Validate(run_args) => {
                let config = resolve_config(cli, run_args)?;
                run_config_validate(&config, cli.format)
            }
        },

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::ConflictingThresholds) => {
            eprintln!();
            eprintln!("Hint: Use either --threshold or the per-service");
            eprintln!("      --discord-threshold / --pagerduty-threshold flags, not both.");
        }
        AppError::Config(ConfigError::MissingField(field)) if field == "discord.webhook_url" => {
            eprintln!();
            eprintln!("Hint: Pass --webhook or set the DISCORD_WEBHOOK environment variable.");
        }
        AppError::Config(ConfigError::MissingField(field)) if field == "pagerduty.routing_key" => {
            eprintln!();
            eprintln!("Hint: Pass --key or set the PD_API_KEY environment variable.");
        }
        AppError::Config(ConfigError::MissingField(field)) if field.starts_with("source.") => {
            eprintln!();
            eprintln!("Hint: Pass --addresses and --lcd, or set them in pomon.toml.");
        }
        _ => {}
    }
}
