//! Per-address miss counter memory

use crate::domain::MissTrend;
use std::collections::HashMap;

/// Last observed miss count per monitored address
///
/// Entries are created on the first successful reading and live for the
/// lifetime of the process.
#[derive(Debug, Default)]
pub struct MissTracker {
    previous: HashMap<String, u64>,
}

impl MissTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a reading against the last recorded one
    pub fn classify(&self, address: &str, misses: u64) -> MissTrend {
        MissTrend::classify(self.previous(address), misses)
    }

    /// Remember the latest reading for an address
    pub fn record(&mut self, address: &str, misses: u64) {
        self.previous.insert(address.to_string(), misses);
    }

    /// Last recorded reading for an address
    pub fn previous(&self, address: &str) -> Option<u64> {
        self.previous.get(address).copied()
    }
}
