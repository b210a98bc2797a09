//! Mock implementations for testing
//!
//! Provides a scripted metric source and a recording notifier for unit
//! testing without network access.

use crate::alerts::{AlertNotice, Notifier};
use crate::domain::{MissReading, ServiceKind};
use crate::error::{NotifyError, SourceError};
use crate::source::MetricSource;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Endpoint reported by mock readings
pub const MOCK_ENDPOINT: &str = "https://lcd.mock";

#[derive(Debug, Clone, Copy)]
enum MockReading {
    Misses(u64),
    Unreachable,
    Malformed,
}

/// Mock metric source with per-address scripted answers
#[derive(Debug, Default)]
pub struct MockSource {
    readings: RwLock<HashMap<String, MockReading>>,
}

impl MockSource {
    /// Create an empty source; unknown addresses are unreachable
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the miss counter for an address
    pub fn set_misses(&self, address: &str, misses: u64) {
        self.set(address, MockReading::Misses(misses));
    }

    /// Make every endpoint fail for an address
    pub fn set_unreachable(&self, address: &str) {
        self.set(address, MockReading::Unreachable);
    }

    /// Answer with an unparseable body for an address
    pub fn set_malformed(&self, address: &str) {
        self.set(address, MockReading::Malformed);
    }

    fn set(&self, address: &str, reading: MockReading) {
        self.readings
            .write()
            .unwrap()
            .insert(address.to_string(), reading);
    }
}

impl MetricSource for MockSource {
    fn miss_count(&self, address: &str) -> Result<MissReading, SourceError> {
        let reading = self.readings.read().unwrap().get(address).copied();
        match reading {
            Some(MockReading::Misses(misses)) => {
                Ok(MissReading::new(address, misses, MOCK_ENDPOINT))
            }
            Some(MockReading::Malformed) => Err(SourceError::Malformed {
                endpoint: MOCK_ENDPOINT.to_string(),
                message: "missing field `miss_counter`".to_string(),
            }),
            Some(MockReading::Unreachable) | None => Err(SourceError::AllEndpointsFailed {
                address: address.to_string(),
                attempted: 1,
                last_error: "status 503".to_string(),
            }),
        }
    }
}

/// Notifier that records every notice it is asked to send
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    service: ServiceKind,
    sent: Arc<Mutex<Vec<AlertNotice>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Create a recorder for `service`
    pub fn new(service: ServiceKind) -> Self {
        Self {
            service,
            sent: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make subsequent sends fail (they are still recorded)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Notices sent so far
    pub fn sent(&self) -> Vec<AlertNotice> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of send attempts so far
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &AlertNotice) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notice.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Rejected {
                service: self.service.to_string(),
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }

    fn service(&self) -> ServiceKind {
        self.service
    }
}
