//! Candidate-list construction
//!
//! Pure with respect to its inputs: reads the catalog and health tracker,
//! returns a fresh list.

use super::types::{Priority, PromptCategory};
use crate::catalog::{ModelCatalog, ModelDescriptor, Provider};
use crate::credentials::ProviderCredentials;
use crate::health::HealthTracker;
use chrono::{DateTime, Utc};

/// Minimum candidates before topping up from other priorities
pub const MIN_CANDIDATES: usize = 3;

/// Maximum candidates in a routing decision
pub const MAX_CANDIDATES: usize = 5;

/// Filter shared by candidate construction and override resolution
pub(crate) struct Eligibility<'a> {
    pub(crate) health: &'a HealthTracker,
    pub(crate) credentials: &'a ProviderCredentials,
    pub(crate) excluded: &'a [Provider],
    pub(crate) now: DateTime<Utc>,
}

impl Eligibility<'_> {
    pub(crate) fn allows(&self, model: &ModelDescriptor) -> bool {
        self.credentials.has(model.provider)
            && !self.excluded.contains(&model.provider)
            && self.health.is_available_at(model.provider, self.now)
    }
}

/// Build the ordered candidate list for a category and priority
///
/// 1. Take the preference list for (category, priority)
/// 2. Keep models with credentials, not excluded, not in cooldown
/// 3. Below three candidates, top up from the other priorities' lists
/// 4. Cap at five, preserving order
#[must_use]
pub fn build_candidates(
    catalog: &ModelCatalog,
    health: &HealthTracker,
    credentials: &ProviderCredentials,
    category: PromptCategory,
    priority: Priority,
    excluded: &[Provider],
) -> Vec<ModelDescriptor> {
    let eligibility = Eligibility {
        health,
        credentials,
        excluded,
        now: Utc::now(),
    };
    collect_candidates(catalog, &eligibility, category, priority)
}

pub(crate) fn collect_candidates(
    catalog: &ModelCatalog,
    eligibility: &Eligibility<'_>,
    category: PromptCategory,
    priority: Priority,
) -> Vec<ModelDescriptor> {
    let mut selected: Vec<ModelDescriptor> = Vec::new();

    let push_from = |selected: &mut Vec<ModelDescriptor>, p: Priority, limit: usize| {
        for id in catalog.preferences(category, p) {
            if selected.len() >= limit {
                break;
            }
            if selected.iter().any(|m| &m.id == id) {
                continue;
            }
            if let Some(model) = catalog.get(id) {
                if eligibility.allows(model) {
                    selected.push(model.clone());
                }
            }
        }
    };

    push_from(&mut selected, priority, MAX_CANDIDATES);

    for other in priority.others() {
        if selected.len() >= MIN_CANDIDATES {
            break;
        }
        push_from(&mut selected, other, MIN_CANDIDATES);
    }

    selected.truncate(MAX_CANDIDATES);
    selected
}
