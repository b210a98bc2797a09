//! Configuration builder
//!
//! Merges configuration from files, CLI arguments and the environment.
//! Later sources win, except that environment credentials only fill gaps.

use crate::config::{Config, ConfigFile, DISCORD_WEBHOOK_ENV, PAGERDUTY_KEY_ENV};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist. Without one, the default locations are
    /// tried and the defaults are kept if none exists.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default()?,
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.config.general.verbose = true;
        }
        self
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        if dry_run {
            self.config.general.dry_run = true;
        }
        self
    }

    /// Override monitored addresses
    pub fn with_addresses(mut self, addresses: &[String]) -> Self {
        if !addresses.is_empty() {
            self.config.source.addresses = addresses.to_vec();
        }
        self
    }

    /// Override LCD endpoints
    pub fn with_endpoints(mut self, endpoints: &[String]) -> Self {
        if !endpoints.is_empty() {
            self.config.source.endpoints = endpoints.to_vec();
        }
        self
    }

    /// Override poll frequency in minutes
    pub fn with_frequency(mut self, minutes: Option<f64>) -> Self {
        if let Some(m) = minutes {
            self.config.general.frequency_minutes = m;
        }
        self
    }

    /// Override notification delay in minutes
    pub fn with_delay(mut self, minutes: Option<u64>) -> Self {
        if let Some(m) = minutes {
            self.config.general.delay_minutes = m;
        }
        self
    }

    /// Override global threshold
    pub fn with_threshold(mut self, threshold: Option<u64>) -> Self {
        if threshold.is_some() {
            self.config.general.threshold = threshold;
        }
        self
    }

    /// Override Discord settings
    pub fn with_discord(
        mut self,
        enabled: bool,
        webhook_url: Option<String>,
        user_id: Option<String>,
        threshold: Option<u64>,
    ) -> Self {
        let discord = &mut self.config.discord;
        discord.enabled |= enabled;
        if webhook_url.is_some() {
            discord.webhook_url = webhook_url;
        }
        if user_id.is_some() {
            discord.user_id = user_id;
        }
        if threshold.is_some() {
            discord.threshold = threshold;
        }
        self
    }

    /// Override PagerDuty settings
    pub fn with_pagerduty(
        mut self,
        enabled: bool,
        routing_key: Option<String>,
        threshold: Option<u64>,
    ) -> Self {
        let pagerduty = &mut self.config.pagerduty;
        pagerduty.enabled |= enabled;
        if routing_key.is_some() {
            pagerduty.routing_key = routing_key;
        }
        if threshold.is_some() {
            pagerduty.threshold = threshold;
        }
        self
    }

    /// Fill missing credentials of enabled services from the environment
    pub fn with_env_credentials<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.config.discord.enabled && self.config.discord.webhook_url.is_none() {
            self.config.discord.webhook_url = lookup(DISCORD_WEBHOOK_ENV);
        }
        if self.config.pagerduty.enabled && self.config.pagerduty.routing_key.is_none() {
            self.config.pagerduty.routing_key = lookup(PAGERDUTY_KEY_ENV);
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
