//! Service layer for miss monitoring
//!
//! Services encapsulate the poll loop and the per-address miss memory it
//! owns.

pub mod monitor;
pub mod tracker;

pub use monitor::{CycleSummary, Monitor, MonitorConfig};
pub use tracker::MissTracker;
