//! Error types for switchyard-llm

use crate::catalog::Provider;
use crate::router::{Priority, PromptCategory};
use thiserror::Error;

/// Routing engine error type
#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected before routing (e.g. empty prompt)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required credential is missing
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Classification and filtering left no candidate models
    #[error(
        "no models available for {category} with {priority} priority \
         (excluded: {}){}",
        format_providers(excluded),
        format_missing(missing_credentials)
    )]
    NoRoute {
        /// Category the prompt was classified as
        category: PromptCategory,
        /// Requested priority
        priority: Priority,
        /// Providers excluded for this invocation
        excluded: Vec<Provider>,
        /// Credential variables that are not set
        missing_credentials: Vec<String>,
    },

    /// API error reported by the completion service
    #[error("api error: {0}")]
    Api(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("timeout after {0}ms")]
    Timeout(u64),
}

fn format_providers(providers: &[Provider]) -> String {
    if providers.is_empty() {
        return "none".to_string();
    }
    providers
        .iter()
        .map(Provider::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_missing(missing: &[String]) -> String {
    if missing.is_empty() {
        String::new()
    } else {
        format!("; missing credentials: {}", missing.join(", "))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
