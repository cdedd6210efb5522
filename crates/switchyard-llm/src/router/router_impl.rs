//! Router implementation
//!
//! Combines the catalog, the health tracker and the configured credentials
//! into routing decisions.

use super::candidates::{collect_candidates, Eligibility, MAX_CANDIDATES};
use super::decision::RoutingDecision;
use super::rules::CustomOverrides;
use super::types::{Priority, PromptCategory};
use crate::catalog::{ModelCatalog, ModelDescriptor, Provider};
use crate::credentials::ProviderCredentials;
use crate::health::HealthTracker;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Model router
#[derive(Debug, Clone)]
pub struct Router {
    catalog: Arc<ModelCatalog>,
    health: Arc<HealthTracker>,
    credentials: ProviderCredentials,
}

impl Router {
    /// Create a router over a catalog, a shared health tracker and credentials
    #[must_use]
    pub fn new(
        catalog: Arc<ModelCatalog>,
        health: Arc<HealthTracker>,
        credentials: ProviderCredentials,
    ) -> Self {
        Self {
            catalog,
            health,
            credentials,
        }
    }

    /// Get the catalog
    #[must_use]
    pub fn catalog(&self) -> &Arc<ModelCatalog> {
        &self.catalog
    }

    /// Get the health tracker
    #[must_use]
    pub fn health(&self) -> &Arc<HealthTracker> {
        &self.health
    }

    /// Get the configured credentials
    #[must_use]
    pub fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    /// Route a category and priority to an ordered candidate list
    ///
    /// An empty `selected_models` is a valid decision meaning "no route".
    #[must_use]
    pub fn route(
        &self,
        category: PromptCategory,
        priority: Priority,
        excluded: &[Provider],
        overrides: Option<&CustomOverrides>,
    ) -> RoutingDecision {
        let eligibility = Eligibility {
            health: &self.health,
            credentials: &self.credentials,
            excluded,
            now: Utc::now(),
        };

        let candidates = collect_candidates(&self.catalog, &eligibility, category, priority);
        let mut decision = RoutingDecision::new(category, priority, candidates);

        if let Some(ids) = overrides.and_then(|o| o.get(category)) {
            let resolved = self.resolve_overrides(ids, &eligibility);
            if resolved.is_empty() {
                debug!(
                    category = %category,
                    requested = ?ids,
                    "No custom override model is available; keeping default selection"
                );
            } else {
                let names: Vec<&str> = resolved.iter().map(|m| m.id.as_str()).collect();
                let note = format!(
                    "Custom override applied for {category}: {}.",
                    names.join(", ")
                );
                decision.replace_selection(resolved, &note);
            }
        }

        info!(
            category = %category,
            priority = %priority,
            excluded = ?excluded,
            models = ?decision.model_ids(),
            estimated_cost = decision.estimated_cost,
            "Routing decision"
        );

        decision
    }

    fn resolve_overrides(
        &self,
        ids: &[String],
        eligibility: &Eligibility<'_>,
    ) -> Vec<ModelDescriptor> {
        let mut resolved: Vec<ModelDescriptor> = Vec::new();
        for id in ids {
            if resolved.len() >= MAX_CANDIDATES {
                break;
            }
            let Some(model) = self.catalog.get(id.trim()) else {
                debug!(model = %id, "Unknown model in custom override");
                continue;
            };
            if eligibility.allows(model) && !resolved.iter().any(|m| m.id == model.id) {
                resolved.push(model.clone());
            }
        }
        resolved
    }
}
