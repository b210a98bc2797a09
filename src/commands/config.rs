//! Config command implementation
//!
//! Shows or validates the effective configuration without polling.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ServiceEntry, ValidationReport};
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Print the merged configuration with credentials redacted
pub fn run_config_show(config: &Config, format: OutputFormat) -> Result<()> {
    let redacted = config.redacted();

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&redacted).map_err(ConfigError::from)?,
        _ => toml::to_string_pretty(&redacted)
            .map_err(|e| ConfigError::ParseError(format!("Failed to serialize: {}", e)))?,
    };

    println!("{}", rendered);
    Ok(())
}

/// Validate the merged configuration and summarize it
pub fn run_config_validate(config: &Config, format: OutputFormat) -> Result<()> {
    let report = validation_report(config)?;
    print_output(&report, format)?;
    Ok(())
}

/// Run startup validation and build the summary
pub fn validation_report(config: &Config) -> Result<ValidationReport> {
    let services = config.validate()?;

    Ok(ValidationReport {
        addresses: config.source.addresses.len(),
        endpoints: config.source.endpoints.len(),
        frequency_minutes: config.general.frequency_minutes,
        delay_minutes: config.general.delay_minutes,
        services: services.iter().map(ServiceEntry::from).collect(),
    })
}
