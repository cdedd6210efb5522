//! Provider Health Tracker
//!
//! Counts consecutive failures per provider and puts a provider into
//! cooldown once the count reaches the threshold:
//! - Absent: never failed, available
//! - Failing: `failure_count` below threshold, still available
//! - Cooling down: `cooldown_until` in the future, unavailable
//!
//! Any reported success resets the provider completely. State lives in
//! process memory only and is shared between concurrent executions via
//! an `Arc<HealthTracker>` handle.

#[cfg(test)]
mod tests;

use crate::catalog::Provider;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Configuration for the health tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthConfig {
    /// Number of failures before a provider enters cooldown
    pub failure_threshold: u32,
    /// How long a provider stays in cooldown
    pub cooldown: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown: Duration::minutes(5),
        }
    }
}

impl HealthConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set failure threshold
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold.max(1);
        self
    }

    /// Set cooldown duration
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Failure state for a single provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHealthState {
    /// Consecutive failures since the last success
    pub failure_count: u32,
    /// Provider is unavailable until this instant
    pub cooldown_until: Option<DateTime<Utc>>,
    /// When the last failure was reported
    pub last_failure_at: Option<DateTime<Utc>>,
    /// Last error message reported with a failure
    pub last_error: Option<String>,
}

impl ProviderHealthState {
    /// Whether the provider may be selected at `now`
    #[must_use]
    pub fn is_available_at(&self, now: DateTime<Utc>) -> bool {
        self.cooldown_until.map_or(true, |until| until <= now)
    }
}

/// Process-wide provider health tracker
#[derive(Debug, Default)]
pub struct HealthTracker {
    config: HealthConfig,
    states: DashMap<Provider, ProviderHealthState>,
}

impl HealthTracker {
    /// Create a tracker with default thresholds (3 failures, 5 minutes)
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HealthConfig::default())
    }

    /// Create a tracker with custom thresholds
    #[must_use]
    pub fn with_config(config: HealthConfig) -> Self {
        Self {
            config,
            states: DashMap::new(),
        }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Record a failure for a provider
    pub fn report_failure(&self, provider: Provider) -> ProviderHealthState {
        self.report_failure_at(provider, None, Utc::now())
    }

    /// Record a failure with the error message that caused it
    pub fn report_failure_with(&self, provider: Provider, error: &str) -> ProviderHealthState {
        self.report_failure_at(provider, Some(error), Utc::now())
    }

    /// Record a failure at an explicit instant
    pub fn report_failure_at(
        &self,
        provider: Provider,
        error: Option<&str>,
        now: DateTime<Utc>,
    ) -> ProviderHealthState {
        // The entry guard holds the shard lock for the whole update
        let mut state = self.states.entry(provider).or_default();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_at = Some(now);
        if let Some(error) = error {
            state.last_error = Some(error.to_string());
        }

        debug!(
            provider = %provider,
            failures = state.failure_count,
            threshold = self.config.failure_threshold,
            "Provider failure recorded"
        );

        if state.failure_count >= self.config.failure_threshold {
            let until = now + self.config.cooldown;
            if state.cooldown_until.map_or(true, |current| current <= now) {
                warn!(
                    provider = %provider,
                    failures = state.failure_count,
                    cooldown_until = %until,
                    "Provider entering cooldown"
                );
            }
            state.cooldown_until = Some(until);
        }

        state.value().clone()
    }

    /// Record a success; fully resets the provider's state
    pub fn report_success(&self, provider: Provider) {
        if let Some(mut state) = self.states.get_mut(&provider) {
            if state.failure_count > 0 || state.cooldown_until.is_some() {
                info!(provider = %provider, "Provider recovered");
            }
            state.failure_count = 0;
            state.cooldown_until = None;
        }
    }

    /// Whether a provider may currently be selected
    #[must_use]
    pub fn is_available(&self, provider: Provider) -> bool {
        self.is_available_at(provider, Utc::now())
    }

    /// Whether a provider may be selected at `now`
    #[must_use]
    pub fn is_available_at(&self, provider: Provider, now: DateTime<Utc>) -> bool {
        self.states
            .get(&provider)
            .map_or(true, |state| state.is_available_at(now))
    }

    /// Current state for one provider, if it has ever failed
    #[must_use]
    pub fn state(&self, provider: Provider) -> Option<ProviderHealthState> {
        self.states.get(&provider).map(|s| s.value().clone())
    }

    /// Copy of all tracked states, ordered by provider
    ///
    /// Each entry is read under its own shard lock, so writers to other
    /// providers are never blocked for the duration of the snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Provider, ProviderHealthState> {
        self.states
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    /// Forget all tracked state
    pub fn reset(&self) {
        self.states.clear();
    }
}
