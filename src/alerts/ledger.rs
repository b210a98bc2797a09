//! Alert ledger
//!
//! In-memory registry of open alerts keyed by (service, address). The ledger
//! decides when an alert is opened, when an open alert is re-notified, and
//! when it is closed. Cooldown is never stored: it is derived from
//! `last_alert_time` and the delay window at decision time.

use super::types::{Alert, AlertKey, AlertOutcome, Delivery};
use crate::domain::ServiceKind;
use crate::error::NotifyError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Registry of open alerts
#[derive(Debug, Default)]
pub struct AlertLedger {
    alerts: HashMap<AlertKey, Alert>,
}

impl AlertLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the open alert for a key, if any
    pub fn lookup(&self, service: ServiceKind, address: &str) -> Option<&Alert> {
        self.alerts.get(&AlertKey::new(service, address))
    }

    /// Open a new alert or renew an existing one
    ///
    /// A new alert always gets one `send` attempt and is kept whatever the
    /// outcome. An existing alert is only re-sent once `delay` has elapsed
    /// since its last attempt. The stored miss count is updated either way.
    pub fn open_or_renew<F>(
        &mut self,
        service: ServiceKind,
        address: &str,
        misses: u64,
        now: SystemTime,
        delay: Duration,
        send: F,
    ) -> AlertOutcome
    where
        F: FnOnce() -> Result<(), NotifyError>,
    {
        match self.alerts.entry(AlertKey::new(service, address)) {
            Entry::Occupied(mut entry) => {
                if !entry.get().cooldown_elapsed(now, delay) {
                    log::debug!("Alert {} is in cooldown", entry.key());
                    entry.get_mut().misses = misses;
                    return AlertOutcome::Cooldown;
                }

                let alert = entry.get_mut();
                alert.misses = misses;
                let delivery = Delivery::from(&send());
                alert.record_attempt(now, delivery.clone());
                AlertOutcome::Renewed(delivery)
            }
            Entry::Vacant(entry) => {
                let mut alert = Alert::open(service, address, misses, now);
                let delivery = Delivery::from(&send());
                alert.record_attempt(now, delivery.clone());
                entry.insert(alert);
                AlertOutcome::Opened(delivery)
            }
        }
    }

    /// Close an alert whose delay window has elapsed
    ///
    /// Returns true if an alert was removed.
    pub fn close_if_stale(
        &mut self,
        service: ServiceKind,
        address: &str,
        now: SystemTime,
        delay: Duration,
    ) -> bool {
        let key = AlertKey::new(service, address);
        let stale = self
            .alerts
            .get(&key)
            .is_some_and(|alert| alert.cooldown_elapsed(now, delay));

        if stale {
            self.alerts.remove(&key);
        }
        stale
    }

    /// Close an alert regardless of its delay window
    pub fn close_unconditional(&mut self, service: ServiceKind, address: &str) -> Option<Alert> {
        self.alerts.remove(&AlertKey::new(service, address))
    }

    /// All open alerts, ordered by service then address
    pub fn active_alerts(&self) -> Vec<&Alert> {
        let mut alerts: Vec<&Alert> = self.alerts.values().collect();
        alerts.sort_by(|a, b| (a.service, &a.address).cmp(&(b.service, &b.address)));
        alerts
    }

    /// Number of open alerts
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether no alerts are open
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
