//! Metric source layer
//!
//! Provides a trait-based abstraction over the LCD miss counter query for
//! testability.

pub mod lcd;
pub mod traits;

pub use lcd::{parse_miss_counter, LcdClient};
pub use traits::MetricSource;
