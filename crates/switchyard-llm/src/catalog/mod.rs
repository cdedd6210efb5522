//! Model Catalog - descriptors, prices and preference lists
//!
//! This module holds the static knowledge the router works from:
//! which models exist, who hosts them, what they cost, and how they
//! rank for each (category, priority) pair.
//!
//! # Module Structure
//!
//! - `models`: Provider enum, price constants and the descriptor table
//! - `preferences`: Ranked model lists per category and priority

mod models;
mod preferences;

#[cfg(test)]
mod tests;

pub use models::{default_models, ModelDescriptor, Provider};
pub use preferences::default_preferences;

use crate::router::{Priority, PromptCategory};
use std::collections::HashMap;

/// Input tokens assumed when estimating cost before a call
pub const ASSUMED_INPUT_TOKENS: u32 = 500;

/// Output tokens assumed when estimating cost before a call
pub const ASSUMED_OUTPUT_TOKENS: u32 = 150;

/// Read-only model catalog shared by the router and the fallback loop
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: HashMap<String, ModelDescriptor>,
    preferences: HashMap<(PromptCategory, Priority), Vec<String>>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(default_models(), default_preferences())
    }
}

impl ModelCatalog {
    /// Build a catalog from descriptors and preference lists
    ///
    /// Preference entries naming unknown models are kept but never
    /// selected by the router.
    #[must_use]
    pub fn new(
        models: Vec<ModelDescriptor>,
        preferences: HashMap<(PromptCategory, Priority), Vec<String>>,
    ) -> Self {
        let models = models.into_iter().map(|m| (m.id.clone(), m)).collect();
        Self {
            models,
            preferences,
        }
    }

    /// Look up a model by id (`provider/model`)
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.get(id)
    }

    /// Ranked model ids for a category and priority, most preferred first
    #[must_use]
    pub fn preferences(&self, category: PromptCategory, priority: Priority) -> &[String] {
        self.preferences
            .get(&(category, priority))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All models, sorted by id
    #[must_use]
    pub fn models(&self) -> Vec<&ModelDescriptor> {
        let mut models: Vec<_> = self.models.values().collect();
        models.sort_by(|a, b| a.id.cmp(&b.id));
        models
    }

    /// Number of models in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog has no models
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
