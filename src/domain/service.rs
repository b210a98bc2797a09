//! Notification service identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification channel an alert is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// PagerDuty Events API
    PagerDuty,
    /// Discord webhook
    Discord,
}

impl ServiceKind {
    /// Name used in logs and notification errors
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PagerDuty => "PagerDuty",
            Self::Discord => "Discord",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
