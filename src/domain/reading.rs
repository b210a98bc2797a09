//! Miss counter readings
//!
//! A reading is one successful observation of a validator's oracle miss
//! counter, together with the endpoint that served it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build the LCD query path for a validator's miss counter
pub fn miss_query(address: &str) -> String {
    format!("/oracle/validators/{}/miss", address)
}

/// A single miss counter observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissReading {
    /// Validator address
    pub address: String,
    /// Current miss counter value
    pub misses: u64,
    /// Endpoint that answered the query
    pub endpoint: String,
}

impl MissReading {
    /// Create a new reading
    pub fn new(address: impl Into<String>, misses: u64, endpoint: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            misses,
            endpoint: endpoint.into(),
        }
    }

    /// Query path that produced this reading
    pub fn query(&self) -> String {
        miss_query(&self.address)
    }

    /// Full URL that produced this reading
    pub fn source_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), self.query())
    }
}

impl fmt::Display for MissReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} misses", self.address, self.misses)
    }
}

/// Direction of a reading relative to the previous one for the same address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissTrend {
    /// No previous reading exists
    FirstSeen,
    /// Counter went up
    Increased,
    /// Counter did not move
    Unchanged,
    /// Counter dropped; the counter was reset at an epoch boundary
    Decreased,
}

impl MissTrend {
    /// Classify `current` against an optional previous value
    pub fn classify(previous: Option<u64>, current: u64) -> Self {
        match previous {
            None => Self::FirstSeen,
            Some(prev) if current > prev => Self::Increased,
            Some(prev) if current == prev => Self::Unchanged,
            Some(_) => Self::Decreased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_query() {
        assert_eq!(
            miss_query("terravaloper1xyz"),
            "/oracle/validators/terravaloper1xyz/miss"
        );
    }

    #[test]
    fn test_source_url_trims_trailing_slash() {
        let reading = MissReading::new("val1", 4, "https://lcd.example.org/");
        assert_eq!(
            reading.source_url(),
            "https://lcd.example.org/oracle/validators/val1/miss"
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(MissTrend::classify(None, 0), MissTrend::FirstSeen);
        assert_eq!(MissTrend::classify(Some(3), 6), MissTrend::Increased);
        assert_eq!(MissTrend::classify(Some(6), 6), MissTrend::Unchanged);
        assert_eq!(MissTrend::classify(Some(6), 2), MissTrend::Decreased);
    }
}
