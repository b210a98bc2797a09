//! Alert notification system
//!
//! Provides the notification channel trait, the per-service sink that pairs a
//! channel with its threshold, and a dry-run wrapper.

use super::discord::DiscordNotifier;
use super::pagerduty::PagerDutyNotifier;
use super::types::AlertNotice;
use crate::config::ServiceConfig;
use crate::domain::ServiceKind;
use crate::error::NotifyError;
use std::time::Duration;

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Send a notification for an alert
    fn notify(&self, notice: &AlertNotice) -> Result<(), NotifyError>;

    /// Service this channel delivers to
    fn service(&self) -> ServiceKind;
}

/// Logs notifications instead of sending them
pub struct DryRunNotifier {
    service: ServiceKind,
}

impl DryRunNotifier {
    /// Create a dry-run stand-in for `service`
    pub fn new(service: ServiceKind) -> Self {
        Self { service }
    }
}

impl Notifier for DryRunNotifier {
    fn notify(&self, notice: &AlertNotice) -> Result<(), NotifyError> {
        log::info!(
            "[DRY RUN] Would send {} alert: {} (threshold {})",
            self.service,
            notice.summary(),
            notice.threshold
        );
        Ok(())
    }

    fn service(&self) -> ServiceKind {
        self.service
    }
}

/// A configured notification service: channel plus effective threshold
pub struct ServiceSink {
    threshold: u64,
    notifier: Box<dyn Notifier>,
}

impl ServiceSink {
    /// Pair a notifier with its alert threshold
    pub fn new(threshold: u64, notifier: Box<dyn Notifier>) -> Self {
        Self {
            threshold,
            notifier,
        }
    }

    /// Build the sink for a service configuration
    pub fn from_config(
        config: &ServiceConfig,
        timeout: Duration,
        dry_run: bool,
    ) -> Result<Self, NotifyError> {
        let notifier: Box<dyn Notifier> = if dry_run {
            Box::new(DryRunNotifier::new(config.kind()))
        } else {
            match config {
                ServiceConfig::Discord {
                    webhook_url,
                    user_id,
                    ..
                } => Box::new(DiscordNotifier::new(
                    webhook_url.clone(),
                    user_id.clone(),
                    timeout,
                )?),
                ServiceConfig::PagerDuty { routing_key, .. } => {
                    Box::new(PagerDutyNotifier::new(routing_key.clone(), timeout)?)
                }
            }
        };

        Ok(Self::new(config.threshold(), notifier))
    }

    /// Service this sink delivers to
    pub fn service(&self) -> ServiceKind {
        self.notifier.service()
    }

    /// Effective alert threshold
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Send a notification
    pub fn notify(&self, notice: &AlertNotice) -> Result<(), NotifyError> {
        self.notifier.notify(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice() -> AlertNotice {
        AlertNotice {
            address: "val1".to_string(),
            misses: 7,
            threshold: 5,
            endpoint: "https://lcd.example.org".to_string(),
            query: "/oracle/validators/val1/miss".to_string(),
        }
    }

    #[test]
    fn test_dry_run_notifier() {
        let notifier = DryRunNotifier::new(ServiceKind::PagerDuty);
        assert_eq!(notifier.service(), ServiceKind::PagerDuty);
        assert!(notifier.notify(&notice()).is_ok());
    }

    #[test]
    fn test_sink_from_config_dry_run() {
        let config = ServiceConfig::Discord {
            webhook_url: "https://discord.com/api/webhooks/1/abc".to_string(),
            user_id: None,
            threshold: 5,
        };
        let sink = ServiceSink::from_config(&config, Duration::from_secs(1), true).unwrap();
        assert_eq!(sink.service(), ServiceKind::Discord);
        assert_eq!(sink.threshold(), 5);
        assert!(sink.notify(&notice()).is_ok());
    }

    #[test]
    fn test_sink_from_config_live() {
        let config = ServiceConfig::PagerDuty {
            routing_key: "key".to_string(),
            threshold: 8,
        };
        let sink = ServiceSink::from_config(&config, Duration::from_secs(1), false).unwrap();
        assert_eq!(sink.service(), ServiceKind::PagerDuty);
        assert_eq!(sink.threshold(), 8);
    }
}
