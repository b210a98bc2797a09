//! Alert system domain types
//!
//! Defines the open alert record, its ledger key, and the outcomes reported
//! back to the poll driver.

use crate::domain::ServiceKind;
use crate::error::NotifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Composite ledger key: one open alert per service and address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertKey {
    /// Notification service
    pub service: ServiceKind,
    /// Monitored validator address
    pub address: String,
}

impl AlertKey {
    /// Create a new key
    pub fn new(service: ServiceKind, address: impl Into<String>) -> Self {
        Self {
            service,
            address: address.into(),
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.address)
    }
}

/// Result of the most recent notification attempt for an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// Notification accepted by the service
    Delivered,
    /// Notification attempt failed
    Failed(String),
}

impl Delivery {
    /// Whether the notification was accepted
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl From<&Result<(), NotifyError>> for Delivery {
    fn from(result: &Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => Self::Delivered,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Currently open alert for one (service, address) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Notification service
    pub service: ServiceKind,
    /// Monitored validator address
    pub address: String,
    /// Last observed miss count
    pub misses: u64,
    /// When the alert was opened
    pub opened_at: SystemTime,
    /// When a notification was last attempted
    pub last_alert_time: SystemTime,
    /// Number of notification attempts
    pub notifications: u32,
    /// Outcome of the most recent attempt
    pub last_delivery: Option<Delivery>,
}

impl Alert {
    /// Open a new alert at `now`
    pub fn open(
        service: ServiceKind,
        address: impl Into<String>,
        misses: u64,
        now: SystemTime,
    ) -> Self {
        Self {
            service,
            address: address.into(),
            misses,
            opened_at: now,
            last_alert_time: now,
            notifications: 0,
            last_delivery: None,
        }
    }

    /// Ledger key for this alert
    pub fn key(&self) -> AlertKey {
        AlertKey::new(self.service, self.address.clone())
    }

    /// Whether `now` is at or past `last_alert_time + delay`
    ///
    /// A delay that overflows the clock never elapses.
    pub fn cooldown_elapsed(&self, now: SystemTime, delay: Duration) -> bool {
        self.last_alert_time
            .checked_add(delay)
            .is_some_and(|due| now >= due)
    }

    /// Record a notification attempt made at `now`
    pub fn record_attempt(&mut self, now: SystemTime, delivery: Delivery) {
        self.last_alert_time = now;
        self.notifications = self.notifications.saturating_add(1);
        self.last_delivery = Some(delivery);
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} misses ({} notification(s)",
            self.service, self.address, self.misses, self.notifications
        )?;
        if let Some(delivery) = &self.last_delivery {
            write!(f, ", last {}", delivery)?;
        }
        write!(f, ")")
    }
}

/// What `open_or_renew` did for a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// No alert existed; one was created and a notification attempted
    Opened(Delivery),
    /// Cooldown had elapsed; a notification was attempted
    Renewed(Delivery),
    /// Alert is inside its delay window; nothing was sent
    Cooldown,
}

impl AlertOutcome {
    /// Whether a notification was attempted
    pub fn attempted(&self) -> bool {
        !matches!(self, Self::Cooldown)
    }
}

/// Rendered alert content handed to a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertNotice {
    /// Validator address
    pub address: String,
    /// Current miss count
    pub misses: u64,
    /// Effective threshold for the receiving service
    pub threshold: u64,
    /// Endpoint that served the reading
    pub endpoint: String,
    /// Query path on that endpoint
    pub query: String,
}

impl AlertNotice {
    /// One-line summary used by paging services
    pub fn summary(&self) -> String {
        format!("Price Oracle Alert: {} - {} Missed", self.address, self.misses)
    }
}
