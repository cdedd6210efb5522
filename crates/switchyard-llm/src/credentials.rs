//! Provider credentials
//!
//! The router only selects models whose provider has a credential
//! configured. Presence is all that matters here; the keys themselves are
//! never stored.

use crate::catalog::Provider;
use std::collections::BTreeSet;

/// Set of providers that have credentials configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    configured: BTreeSet<Provider>,
}

impl ProviderCredentials {
    /// No provider configured
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every provider configured
    #[must_use]
    pub fn all() -> Self {
        Self {
            configured: Provider::ALL.into_iter().collect(),
        }
    }

    /// Read each provider's API key variable from the environment
    ///
    /// Empty values count as missing.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let configured = Provider::ALL
            .into_iter()
            .filter(|p| {
                lookup(p.credential_env_var())
                    .map(|v| !v.trim().is_empty())
                    .unwrap_or(false)
            })
            .collect();
        Self { configured }
    }

    /// Add a provider
    #[must_use]
    pub fn with(mut self, provider: Provider) -> Self {
        self.configured.insert(provider);
        self
    }

    /// Whether a provider has a credential
    #[must_use]
    pub fn has(&self, provider: Provider) -> bool {
        self.configured.contains(&provider)
    }

    /// Configured providers
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        self.configured.iter().copied().collect()
    }

    /// Names of the variables that are not set
    #[must_use]
    pub fn missing_variables(&self) -> Vec<String> {
        Provider::ALL
            .into_iter()
            .filter(|p| !self.has(*p))
            .map(|p| p.credential_env_var().to_string())
            .collect()
    }

    /// Whether no provider is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configured.is_empty()
    }
}
