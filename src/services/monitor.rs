//! Poll loop monitor
//!
//! Orchestrates the poll cycle: reads every monitored address, classifies the
//! reading against the previous one, and drives the alert ledger and the
//! notification sinks.

use crate::alerts::{is_alertable, AlertLedger, AlertNotice, AlertOutcome, Delivery, ServiceSink};
use crate::config::Config;
use crate::domain::{MissReading, MissTrend, ServiceKind};
use crate::error::ConfigError;
use crate::services::MissTracker;
use crate::source::MetricSource;

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, SystemTime};

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between poll cycles
    pub interval: Duration,
    /// Minimum time between notifications for an open alert
    pub delay: Duration,
    /// Validator addresses to poll, in order
    pub addresses: Vec<String>,
    /// Whether to exit after one cycle
    pub single_use: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5 * 60),
            delay: Duration::from_secs(30 * 60),
            addresses: Vec::new(),
            single_use: false,
        }
    }
}

impl MonitorConfig {
    /// Derive monitor settings from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            interval: config.poll_interval()?,
            delay: config.delay(),
            addresses: config.source.addresses.clone(),
            single_use: false,
        })
    }
}

/// Counts for one poll cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Addresses with a successful reading
    pub polled: usize,
    /// Addresses skipped because the source failed
    pub skipped: usize,
    /// Notification attempts
    pub notifications: usize,
    /// Alerts closed
    pub closed: usize,
}

/// Poll loop monitor
pub struct Monitor<S: MetricSource> {
    config: MonitorConfig,
    source: S,
    sinks: Vec<ServiceSink>,
    ledger: AlertLedger,
    tracker: MissTracker,
}

impl<S: MetricSource> Monitor<S> {
    /// Create a new monitor
    pub fn new(config: MonitorConfig, source: S, sinks: Vec<ServiceSink>) -> Self {
        Self {
            config,
            source,
            sinks,
            ledger: AlertLedger::new(),
            tracker: MissTracker::new(),
        }
    }

    /// Run one poll cycle at the current time
    pub fn tick(&mut self) -> CycleSummary {
        self.tick_at(SystemTime::now())
    }

    /// Run one poll cycle at `now`
    pub fn tick_at(&mut self, now: SystemTime) -> CycleSummary {
        let mut summary = CycleSummary::default();
        let addresses = self.config.addresses.clone();

        for address in &addresses {
            match self.source.miss_count(address) {
                Ok(reading) => {
                    log::debug!("Read {} from {}", reading, reading.source_url());
                    summary.polled += 1;
                    self.apply_reading(&reading, now, &mut summary);
                    log::info!("Current misses for {}: {}", address, reading.misses);
                }
                Err(e) => {
                    summary.skipped += 1;
                    log::warn!("Skipping {} this cycle: {}", address, e);
                }
            }
        }

        log::info!("Active alerts: {}", self.ledger.len());
        for alert in self.ledger.active_alerts() {
            log::debug!("  {}", alert);
        }

        summary
    }

    fn apply_reading(
        &mut self,
        reading: &MissReading,
        now: SystemTime,
        summary: &mut CycleSummary,
    ) {
        let address = reading.address.as_str();
        let delay = self.config.delay;

        match self.tracker.classify(address, reading.misses) {
            MissTrend::FirstSeen | MissTrend::Increased => {
                for sink in &self.sinks {
                    if !is_alertable(sink.threshold(), reading.misses) {
                        continue;
                    }

                    let service = sink.service();
                    let notice = AlertNotice {
                        address: address.to_string(),
                        misses: reading.misses,
                        threshold: sink.threshold(),
                        endpoint: reading.endpoint.clone(),
                        query: reading.query(),
                    };

                    let outcome = self.ledger.open_or_renew(
                        service,
                        address,
                        reading.misses,
                        now,
                        delay,
                        || sink.notify(&notice),
                    );

                    match &outcome {
                        AlertOutcome::Opened(delivery) => {
                            log::info!(
                                "Opened {} alert for {} ({} misses)",
                                service,
                                address,
                                reading.misses
                            );
                            report_delivery(service, delivery);
                        }
                        AlertOutcome::Renewed(delivery) => {
                            log::info!(
                                "Renewed {} alert for {} ({} misses)",
                                service,
                                address,
                                reading.misses
                            );
                            report_delivery(service, delivery);
                        }
                        AlertOutcome::Cooldown => {}
                    }

                    if outcome.attempted() {
                        summary.notifications += 1;
                    }
                }
                self.tracker.record(address, reading.misses);
            }
            MissTrend::Unchanged => {
                for sink in &self.sinks {
                    let service = sink.service();
                    if self.ledger.close_if_stale(service, address, now, delay) {
                        log::info!("Cleaning up stale {} alert for {}", service, address);
                        summary.closed += 1;
                    }
                }
            }
            MissTrend::Decreased => {
                for sink in &self.sinks {
                    let service = sink.service();
                    if self.ledger.close_unconditional(service, address).is_some() {
                        log::info!("Miss counter reset for {}, closed {} alert", address, service);
                        summary.closed += 1;
                    }
                }
                self.tracker.record(address, reading.misses);
            }
        }
    }

    /// Run the poll loop until `shutdown` fires or its sender is dropped
    ///
    /// Shutdown is only observed between cycles; a cycle in progress always
    /// completes.
    pub fn run(&mut self, shutdown: &Receiver<()>) {
        log::info!(
            "Monitoring {} address(es) every {:?} with {} service(s)",
            self.config.addresses.len(),
            self.config.interval,
            self.sinks.len()
        );

        loop {
            let summary = self.tick();
            log::debug!("Cycle complete: {:?}", summary);

            if self.config.single_use {
                log::info!("Single-use mode: exiting after one cycle");
                break;
            }

            match shutdown.recv_timeout(self.config.interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    log::info!("Shutdown requested, stopping monitor");
                    break;
                }
            }
        }

        log::info!("Monitor stopped with {} open alert(s)", self.ledger.len());
    }

    /// Alert ledger
    pub fn ledger(&self) -> &AlertLedger {
        &self.ledger
    }

    /// Per-address miss memory
    pub fn tracker(&self) -> &MissTracker {
        &self.tracker
    }

    /// Metric source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

fn report_delivery(service: ServiceKind, delivery: &Delivery) {
    if let Delivery::Failed(reason) = delivery {
        log::error!("Error sending alert: {}: {}", service, reason);
    }
}
