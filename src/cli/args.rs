//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Price oracle miss monitor
///
/// Polls validator oracle miss counters and raises alerts on Discord and
/// PagerDuty when they cross a threshold.
#[derive(Parser, Debug)]
#[command(name = "pomon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (RUST_LOG is honored when not set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "POMON_CONFIG")]
    pub config: Option<String>,

    /// Validator addresses to monitor (repeatable or comma-separated)
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub addresses: Vec<String>,

    /// LCD endpoint(s) to query, tried in order
    #[arg(short, long = "lcd", global = true, value_delimiter = ',')]
    pub lcd: Vec<String>,

    /// Dry run mode - log notifications instead of sending them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the monitoring loop
    Run(RunArgs),

    /// Query current miss counters once and print them
    Check,

    /// Inspect the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Minutes between miss counter checks
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// Minutes between repeated notifications
    #[arg(short = 'e', long)]
    pub delay: Option<u64>,

    /// Global miss threshold for all services
    #[arg(short, long)]
    pub threshold: Option<u64>,

    /// Discord specific threshold
    #[arg(long)]
    pub discord_threshold: Option<u64>,

    /// PagerDuty specific threshold
    #[arg(long)]
    pub pagerduty_threshold: Option<u64>,

    /// Enable Discord notifications
    #[arg(short, long)]
    pub discord: bool,

    /// Discord webhook URL (falls back to DISCORD_WEBHOOK)
    #[arg(short, long)]
    pub webhook: Option<String>,

    /// Discord user ID to mention in alerts
    #[arg(short, long = "userid")]
    pub user_id: Option<String>,

    /// Enable PagerDuty notifications
    #[arg(short, long)]
    pub pagerduty: bool,

    /// PagerDuty routing key (falls back to PD_API_KEY)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

/// Arguments for config commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration with credentials redacted
    Show(RunArgs),

    /// Validate the merged configuration
    Validate(RunArgs),
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
