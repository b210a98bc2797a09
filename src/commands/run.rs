//! Run command implementation
//!
//! Starts the poll loop and keeps it running until interrupted.

use crate::alerts::ServiceSink;
use crate::cli::args::RunArgs;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::{Monitor, MonitorConfig};
use crate::source::LcdClient;

use std::sync::mpsc;

/// Execute the run command
pub fn run_monitor(args: &RunArgs, config: &Config) -> Result<()> {
    // Reject bad configuration before the first poll
    let services = config.validate()?;

    let mut monitor_config = MonitorConfig::from_config(config)?;
    monitor_config.single_use = args.once;

    let timeout = config.request_timeout();
    let dry_run = config.general.dry_run;

    let sinks = services
        .iter()
        .map(|service| ServiceSink::from_config(service, timeout, dry_run))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if sinks.is_empty() {
        log::warn!("No notification services enabled; miss counters will only be logged");
    }
    for sink in &sinks {
        log::info!("{} alerts enabled (threshold {})", sink.service(), sink.threshold());
    }
    if dry_run {
        log::info!("Dry run: notifications will be logged, not sent");
    }

    let source = LcdClient::new(config.source.endpoints.clone(), timeout)?;
    log::debug!("LCD endpoints: {}", source.endpoints().join(", "));

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .map_err(|e| AppError::Signal(e.to_string()))?;

    let mut monitor = Monitor::new(monitor_config, source, sinks);
    monitor.run(&rx);

    Ok(())
}
