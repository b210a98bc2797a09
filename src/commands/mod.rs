//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod config;
pub mod run;

pub use check::run_check;
pub use config::{run_config_show, run_config_validate};
pub use run::run_monitor;

use crate::cli::args::{Cli, RunArgs};
use crate::config::{Config, ConfigBuilder};
use crate::error::Result;

/// Merge file, CLI and environment into the effective configuration
pub fn resolve_config(cli: &Cli, args: &RunArgs) -> Result<Config> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose)
        .with_dry_run(cli.dry_run)
        .with_addresses(&cli.addresses)
        .with_endpoints(&cli.lcd)
        .with_frequency(args.frequency)
        .with_delay(args.delay)
        .with_threshold(args.threshold)
        .with_discord(
            args.discord,
            args.webhook.clone(),
            args.user_id.clone(),
            args.discord_threshold,
        )
        .with_pagerduty(args.pagerduty, args.key.clone(), args.pagerduty_threshold)
        .with_env_credentials(|name| std::env::var(name).ok())
        .build();

    Ok(config)
}
