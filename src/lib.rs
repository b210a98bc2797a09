//! pomon - price oracle miss monitor library
//!
//! This library provides the core functionality for polling validator oracle
//! miss counters and managing the alert lifecycle on Discord and PagerDuty.
//!
//! # Modules
//!
//! - [`alerts`]: Alert ledger, threshold evaluation and notifiers
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models
//! - [`error`]: Error types
//! - [`services`]: Poll loop
//! - [`source`]: LCD miss counter client

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod services;
pub mod source;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
