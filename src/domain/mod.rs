//! Domain models for pomon
//!
//! Plain data types shared by the metric source, the alert ledger and the
//! poll driver.

pub mod reading;
pub mod service;

pub use reading::{miss_query, MissReading, MissTrend};
pub use service::ServiceKind;
