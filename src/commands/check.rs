//! Check command implementation
//!
//! Queries every configured address once and prints the miss counters.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, MissEntry, MissReport};
use crate::config::Config;
use crate::error::Result;
use crate::source::{LcdClient, MetricSource};

/// Execute the check command
pub fn run_check(config: &Config, format: OutputFormat) -> Result<()> {
    config.validate_source()?;

    let source = LcdClient::new(config.source.endpoints.clone(), config.request_timeout())?;
    let report = collect_report(&source, &config.source.addresses);

    print_output(&report, format)?;
    Ok(())
}

/// Query each address, recording failures instead of aborting
pub fn collect_report<S: MetricSource>(source: &S, addresses: &[String]) -> MissReport {
    let entries = addresses
        .iter()
        .map(|address| match source.miss_count(address) {
            Ok(reading) => MissEntry {
                address: address.clone(),
                misses: Some(reading.misses),
                endpoint: Some(reading.endpoint),
                error: None,
            },
            Err(e) => {
                log::warn!("Failed to query {}: {}", address, e);
                MissEntry {
                    address: address.clone(),
                    misses: None,
                    endpoint: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    MissReport { entries }
}
