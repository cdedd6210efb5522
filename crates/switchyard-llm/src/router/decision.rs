//! Routing decision

use super::types::{Priority, PromptCategory};
use crate::catalog::{ModelDescriptor, Provider};
use serde::{Deserialize, Serialize};

/// Outcome of one routing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Category the prompt was routed for
    pub category: PromptCategory,
    /// Candidate models, most preferred first (0-5 entries)
    pub selected_models: Vec<ModelDescriptor>,
    /// Human-readable explanation
    pub reasoning: String,
    /// Mean estimated per-call cost of the selected models (USD)
    pub estimated_cost: f64,
    /// Priority the caller asked for
    pub priority: Priority,
}

impl RoutingDecision {
    pub(crate) fn new(
        category: PromptCategory,
        priority: Priority,
        selected_models: Vec<ModelDescriptor>,
    ) -> Self {
        let estimated_cost = mean_estimated_cost(&selected_models);
        let reasoning = describe(category, priority, &selected_models);
        Self {
            category,
            selected_models,
            reasoning,
            estimated_cost,
            priority,
        }
    }

    /// Whether no candidate is available
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_models.is_empty()
    }

    /// Most preferred candidate
    #[must_use]
    pub fn primary(&self) -> Option<&ModelDescriptor> {
        self.selected_models.first()
    }

    /// Candidate ids in order
    #[must_use]
    pub fn model_ids(&self) -> Vec<String> {
        self.selected_models.iter().map(|m| m.id.clone()).collect()
    }

    /// Distinct providers among the candidates, in first-seen order
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        let mut providers = Vec::new();
        for model in &self.selected_models {
            if !providers.contains(&model.provider) {
                providers.push(model.provider);
            }
        }
        providers
    }

    /// Candidate with the given id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ModelDescriptor> {
        self.selected_models.iter().find(|m| m.id == id)
    }

    pub(crate) fn replace_selection(&mut self, models: Vec<ModelDescriptor>, note: &str) {
        self.estimated_cost = mean_estimated_cost(&models);
        self.selected_models = models;
        self.reasoning.push(' ');
        self.reasoning.push_str(note);
    }
}

fn mean_estimated_cost(models: &[ModelDescriptor]) -> f64 {
    if models.is_empty() {
        return 0.0;
    }
    let total: f64 = models.iter().map(ModelDescriptor::estimated_cost).sum();
    (total / models.len() as f64).max(0.0)
}

fn describe(category: PromptCategory, priority: Priority, models: &[ModelDescriptor]) -> String {
    if models.is_empty() {
        return format!(
            "Classified as {category} with {priority} priority; no models available."
        );
    }
    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    format!(
        "Classified as {category} with {priority} priority; selected {} model(s): {}.",
        models.len(),
        ids.join(", ")
    )
}
