//! Alert and notification system
//!
//! Provides the alert ledger state machine, threshold evaluation, and the
//! Discord and PagerDuty notification channels.

mod discord;
mod ledger;
mod notifier;
mod pagerduty;
mod threshold;
mod types;

pub use discord::{DiscordEmbed, DiscordMessage, DiscordNotifier, EmbedField};
pub use ledger::AlertLedger;
pub use notifier::{DryRunNotifier, Notifier, ServiceSink};
pub use pagerduty::{PagerDutyEvent, PagerDutyNotifier, EVENTS_URL, EVENT_SOURCE};
pub use threshold::is_alertable;
pub use types::{Alert, AlertKey, AlertNotice, AlertOutcome, Delivery};
