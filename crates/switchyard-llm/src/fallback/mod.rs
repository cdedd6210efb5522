//! Fallback - bounded retry loop around the completion service
//!
//! One invocation classifies the prompt once, routes, calls the completion
//! service with the ordered candidates and, when the failure looks like a
//! billing, quota or rate-limit problem, excludes the responsible provider
//! and routes again. Every failure is reported to the shared health
//! tracker; every success resets the provider that served it.
//!
//! # Module Structure
//!
//! - `signatures`: Error-text classification and provider blame
//! - `executor`: FallbackExecutor implementation

mod executor;
mod signatures;

#[cfg(test)]
mod tests;

pub use executor::FallbackExecutor;
pub use signatures::{blame_provider, is_provider_exhaustion, EXHAUSTION_SIGNATURES};

use crate::catalog::Provider;
use crate::error::Error;
use crate::router::RoutingDecision;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error as ThisError;

/// Default maximum number of completion calls per invocation
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default per-call timeout
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the fallback executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackConfig {
    /// Maximum completion calls per invocation
    pub max_attempts: u32,
    /// Upper bound for a single completion call (`None` waits forever)
    pub call_timeout: Option<Duration>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
        }
    }
}

impl FallbackConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum attempts (at least one)
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Disable the per-call timeout
    #[must_use]
    pub fn without_call_timeout(mut self) -> Self {
        self.call_timeout = None;
        self
    }
}

/// Successful invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Execution ID shared by logs and usage records
    pub execution_id: String,
    /// Generated text
    pub content: String,
    /// Model that produced the text
    pub model: String,
    /// Provider that produced the text
    pub provider: Provider,
    /// Cost of the successful call (USD)
    pub actual_cost: f64,
    /// Wall-clock latency of the whole invocation
    pub latency_ms: u64,
    /// Completion calls made, including the successful one
    pub attempts: u32,
    /// Routing decision used for the successful call
    pub decision: RoutingDecision,
}

/// Failed invocation
///
/// Carries the underlying error verbatim together with the last routing
/// decision, when routing got that far.
#[derive(Debug, ThisError)]
#[error("{error}")]
pub struct ExecutionError {
    /// Underlying error
    pub error: Error,
    /// Last routing decision, if any
    pub decision: Option<RoutingDecision>,
    /// Completion calls made before giving up
    pub attempts: u32,
}

impl ExecutionError {
    pub(crate) fn new(error: Error, decision: Option<RoutingDecision>, attempts: u32) -> Self {
        Self {
            error,
            decision,
            attempts,
        }
    }

    /// Get the underlying error
    #[must_use]
    pub fn into_inner(self) -> Error {
        self.error
    }

    /// Whether routing found no candidate
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        matches!(self.error, Error::NoRoute { .. })
    }
}
