//! Custom routing overrides
//!
//! Callers may pin an ordered list of model ids per category. When at least
//! one of them is usable, it replaces the router's own selection.

use super::types::PromptCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category-specific model overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomOverrides {
    models: HashMap<PromptCategory, Vec<String>>,
}

impl CustomOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ordered model ids for a category
    #[must_use]
    pub fn with(mut self, category: PromptCategory, models: Vec<String>) -> Self {
        self.set(category, models);
        self
    }

    /// Set the ordered model ids for a category
    ///
    /// An empty list removes the override.
    pub fn set(&mut self, category: PromptCategory, models: Vec<String>) {
        if models.is_empty() {
            self.models.remove(&category);
        } else {
            self.models.insert(category, models);
        }
    }

    /// Model ids configured for a category
    #[must_use]
    pub fn get(&self, category: PromptCategory) -> Option<&[String]> {
        self.models
            .get(&category)
            .map(Vec::as_slice)
            .filter(|m| !m.is_empty())
    }

    /// Whether no override is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.values().all(Vec::is_empty)
    }
}

impl From<HashMap<PromptCategory, Vec<String>>> for CustomOverrides {
    fn from(models: HashMap<PromptCategory, Vec<String>>) -> Self {
        let mut overrides = Self::new();
        for (category, ids) in models {
            overrides.set(category, ids);
        }
        overrides
    }
}
