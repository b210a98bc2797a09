//! PagerDuty Events API v2 notifier

use super::notifier::Notifier;
use super::types::AlertNotice;
use crate::domain::ServiceKind;
use crate::error::NotifyError;
use crate::http;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

/// Events API v2 enqueue URL
pub const EVENTS_URL: &str = "https://events.pagerduty.com/v2/enqueue";

/// Source tag attached to every triggered event
pub const EVENT_SOURCE: &str = "pomon";

/// Events API request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PagerDutyEvent {
    /// Integration routing key
    pub routing_key: String,
    /// Always `trigger`
    pub event_action: &'static str,
    /// Event details
    pub payload: EventPayload,
}

/// Event payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventPayload {
    /// Incident title
    pub summary: String,
    /// Originating system
    pub source: &'static str,
    /// Incident severity
    pub severity: &'static str,
}

/// PagerDuty client
pub struct PagerDutyNotifier {
    routing_key: String,
    events_url: String,
    client: Client,
}

impl PagerDutyNotifier {
    /// Create a notifier for an integration routing key
    pub fn new(routing_key: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = http::client(timeout)?;
        Ok(Self {
            routing_key: routing_key.into(),
            events_url: EVENTS_URL.to_string(),
            client,
        })
    }

    /// Override the events endpoint
    pub fn with_events_url(mut self, url: impl Into<String>) -> Self {
        self.events_url = url.into();
        self
    }

    /// Render the trigger event for an alert
    pub fn build_event(&self, notice: &AlertNotice) -> PagerDutyEvent {
        PagerDutyEvent {
            routing_key: self.routing_key.clone(),
            event_action: "trigger",
            payload: EventPayload {
                summary: notice.summary(),
                source: EVENT_SOURCE,
                severity: "critical",
            },
        }
    }
}

impl Notifier for PagerDutyNotifier {
    fn notify(&self, notice: &AlertNotice) -> Result<(), NotifyError> {
        let event = self.build_event(notice);
        log::debug!("Triggering PagerDuty event for {}", notice.address);

        let response = self.client.post(&self.events_url).json(&event).send()?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        Err(NotifyError::Rejected {
            service: ServiceKind::PagerDuty.to_string(),
            status: status.as_u16(),
            message: response.text().unwrap_or_default(),
        })
    }

    fn service(&self) -> ServiceKind {
        ServiceKind::PagerDuty
    }
}
