//! Configuration system
//!
//! Handles TOML config file parsing, CLI argument merging, and validation
//! into per-service settings.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::ServiceKind;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the Discord webhook URL
pub const DISCORD_WEBHOOK_ENV: &str = "DISCORD_WEBHOOK";

/// Environment variable holding the PagerDuty routing key
pub const PAGERDUTY_KEY_ENV: &str = "PD_API_KEY";

/// Shortest accepted poll interval
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

const REDACTED: &str = "<redacted>";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Metric source settings
    pub source: SourceConfig,
    /// Discord notification settings
    pub discord: DiscordConfig,
    /// PagerDuty notification settings
    pub pagerduty: PagerDutyConfig,
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Log notifications instead of sending them
    pub dry_run: bool,
    /// Minutes between poll cycles
    pub frequency_minutes: f64,
    /// Minutes between repeated notifications for an open alert
    pub delay_minutes: u64,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Global alert threshold, applied to every service
    pub threshold: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            frequency_minutes: 5.0,
            delay_minutes: 30,
            request_timeout_secs: 10,
            threshold: None,
        }
    }
}

/// Metric source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// Validator addresses to monitor
    pub addresses: Vec<String>,
    /// LCD endpoints, tried in order
    pub endpoints: Vec<String>,
}

/// Discord configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscordConfig {
    /// Enable Discord notifications
    pub enabled: bool,
    /// Webhook URL
    pub webhook_url: Option<String>,
    /// User ID to mention in alerts
    pub user_id: Option<String>,
    /// Service-specific threshold
    pub threshold: Option<u64>,
}

impl DiscordConfig {
    /// Enabled explicitly or implied by a webhook URL
    pub fn is_active(&self) -> bool {
        self.enabled || self.webhook_url.is_some()
    }
}

/// PagerDuty configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PagerDutyConfig {
    /// Enable PagerDuty notifications
    pub enabled: bool,
    /// Events API v2 routing key
    pub routing_key: Option<String>,
    /// Service-specific threshold
    pub threshold: Option<u64>,
}

impl PagerDutyConfig {
    /// Enabled explicitly or implied by a routing key
    pub fn is_active(&self) -> bool {
        self.enabled || self.routing_key.is_some()
    }
}

/// Validated settings for one notification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceConfig {
    /// Discord webhook
    Discord {
        webhook_url: String,
        user_id: Option<String>,
        threshold: u64,
    },
    /// PagerDuty Events API
    PagerDuty { routing_key: String, threshold: u64 },
}

impl ServiceConfig {
    /// Service kind
    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::Discord { .. } => ServiceKind::Discord,
            Self::PagerDuty { .. } => ServiceKind::PagerDuty,
        }
    }

    /// Effective alert threshold
    pub fn threshold(&self) -> u64 {
        match self {
            Self::Discord { threshold, .. } | Self::PagerDuty { threshold, .. } => *threshold,
        }
    }
}

impl Config {
    /// Interval between poll cycles
    ///
    /// Must be finite and at least [`MIN_POLL_INTERVAL`].
    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        let minutes = self.general.frequency_minutes;
        let invalid = |message: String| ConfigError::InvalidValue {
            key: "general.frequency_minutes".to_string(),
            message,
        };

        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(invalid(format!(
                "must be a positive number of minutes, got {}",
                minutes
            )));
        }

        let interval = Duration::try_from_secs_f64(minutes * 60.0)
            .map_err(|e| invalid(format!("{} minutes is out of range: {}", minutes, e)))?;

        if interval < MIN_POLL_INTERVAL {
            return Err(invalid(format!(
                "must be at least {} second(s), got {:?}",
                MIN_POLL_INTERVAL.as_secs(),
                interval
            )));
        }

        Ok(interval)
    }

    /// Cooldown between repeated notifications
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.general.delay_minutes.saturating_mul(60))
    }

    /// Per-request HTTP timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.general.request_timeout_secs)
    }

    /// Check that there is something to poll
    pub fn validate_source(&self) -> Result<(), ConfigError> {
        if self.source.addresses.is_empty() {
            return Err(ConfigError::MissingField("source.addresses".to_string()));
        }
        if self.source.endpoints.is_empty() {
            return Err(ConfigError::MissingField("source.endpoints".to_string()));
        }
        Ok(())
    }

    /// Resolve the enabled notification services
    ///
    /// A global threshold may not be combined with service thresholds, and
    /// every enabled service needs a credential and an effective threshold.
    pub fn services(&self) -> Result<Vec<ServiceConfig>, ConfigError> {
        let global = self.general.threshold;
        let service_threshold =
            self.discord.threshold.is_some() || self.pagerduty.threshold.is_some();
        if global.is_some() && service_threshold {
            return Err(ConfigError::ConflictingThresholds);
        }

        let mut services = Vec::new();

        if self.pagerduty.is_active() {
            let routing_key = self
                .pagerduty
                .routing_key
                .clone()
                .ok_or_else(|| ConfigError::MissingField("pagerduty.routing_key".to_string()))?;
            let threshold = global
                .or(self.pagerduty.threshold)
                .ok_or_else(|| ConfigError::MissingField("pagerduty.threshold".to_string()))?;
            services.push(ServiceConfig::PagerDuty {
                routing_key,
                threshold,
            });
        }

        if self.discord.is_active() {
            let webhook_url = self
                .discord
                .webhook_url
                .clone()
                .ok_or_else(|| ConfigError::MissingField("discord.webhook_url".to_string()))?;
            let threshold = global
                .or(self.discord.threshold)
                .ok_or_else(|| ConfigError::MissingField("discord.threshold".to_string()))?;
            services.push(ServiceConfig::Discord {
                webhook_url,
                user_id: self.discord.user_id.clone(),
                threshold,
            });
        }

        Ok(services)
    }

    /// Run every startup check and return the resolved services
    pub fn validate(&self) -> Result<Vec<ServiceConfig>, ConfigError> {
        let services = self.services()?;
        self.validate_source()?;
        self.poll_interval()?;
        Ok(services)
    }

    /// Copy with credentials masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.discord.webhook_url.is_some() {
            config.discord.webhook_url = Some(REDACTED.to_string());
        }
        if config.pagerduty.routing_key.is_some() {
            config.pagerduty.routing_key = Some(REDACTED.to_string());
        }
        config
    }
}
