//! Error-text classification
//!
//! The completion service reports failures as free text. These helpers
//! decide whether a failure means the provider ran out of credit, quota or
//! rate budget, and which provider the text is about.

use crate::catalog::{ModelDescriptor, Provider};

/// Case-insensitive substrings marking a provider-exhaustion error
pub const EXHAUSTION_SIGNATURES: [&str; 7] = [
    "credit",
    "quota",
    "billing",
    "429",
    "402",
    "insufficient funds",
    "rate limit",
];

/// Whether the error text carries a billing, quota or rate-limit signature
#[must_use]
pub fn is_provider_exhaustion(message: &str) -> bool {
    let lower = message.to_lowercase();
    EXHAUSTION_SIGNATURES.iter().any(|s| lower.contains(s))
}

/// Provider named in the error text
///
/// Providers among the candidates are checked first, in candidate order,
/// then every known provider. `None` when the text names no provider.
#[must_use]
pub fn blame_provider(message: &str, candidates: &[ModelDescriptor]) -> Option<Provider> {
    let lower = message.to_lowercase();
    let named = |provider: &Provider| provider.aliases().iter().any(|a| lower.contains(a));

    candidates
        .iter()
        .map(|m| m.provider)
        .find(|p| named(p))
        .or_else(|| Provider::ALL.into_iter().find(|p| named(p)))
}
