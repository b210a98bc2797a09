//! Trait definitions for miss counter queries
//!
//! These traits abstract over the LCD REST API to enable testing with mocks.

use crate::domain::MissReading;
use crate::error::SourceError;

/// Trait for reading a validator's oracle miss counter
pub trait MetricSource: Send + Sync {
    /// Fetch the current miss counter for an address
    fn miss_count(&self, address: &str) -> Result<MissReading, SourceError>;
}
