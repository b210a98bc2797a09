//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::ServiceConfig;
use crate::domain::ServiceKind;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Miss counter check result for one address
#[derive(Debug, Clone, Serialize)]
pub struct MissEntry {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDisplay for MissEntry {
    fn to_table(&self) -> String {
        match (&self.misses, &self.error) {
            (Some(misses), _) => format!(
                "{}: {} misses (via {})",
                self.address,
                misses,
                self.endpoint.as_deref().unwrap_or("-")
            ),
            (None, Some(error)) => format!("{}: error: {}", self.address, error),
            (None, None) => format!("{}: no data", self.address),
        }
    }

    fn to_compact(&self) -> String {
        match self.misses {
            Some(misses) => format!("{}:{}", self.address, misses),
            None => format!("{}:?", self.address),
        }
    }
}

/// Miss counter check results
#[derive(Debug, Clone, Serialize)]
pub struct MissReport {
    pub entries: Vec<MissEntry>,
}

impl TableDisplay for MissReport {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Miss counters ({} address(es)):", self.entries.len())];
        for entry in &self.entries {
            lines.push(format!("  {}", entry.to_table()));
        }
        lines.join("\n")
    }

    fn to_compact(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.to_compact())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Enabled service as shown by `config validate`
#[derive(Debug, Clone, Serialize)]
pub struct ServiceEntry {
    pub service: ServiceKind,
    pub threshold: u64,
}

impl From<&ServiceConfig> for ServiceEntry {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            service: config.kind(),
            threshold: config.threshold(),
        }
    }
}

/// Validation summary
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub addresses: usize,
    pub endpoints: usize,
    pub frequency_minutes: f64,
    pub delay_minutes: u64,
    pub services: Vec<ServiceEntry>,
}

impl TableDisplay for ValidationReport {
    fn to_table(&self) -> String {
        let mut lines = vec![
            "✓ Configuration is valid".to_string(),
            format!("  Addresses: {}", self.addresses),
            format!("  Endpoints: {}", self.endpoints),
            format!("  Frequency: {} min", self.frequency_minutes),
            format!("  Delay:     {} min", self.delay_minutes),
        ];
        if self.services.is_empty() {
            lines.push("  Services:  none (alerts will only be logged)".to_string());
        }
        for entry in &self.services {
            lines.push(format!("  {:<10} threshold {}", entry.service, entry.threshold));
        }
        lines.join("\n")
    }
}
