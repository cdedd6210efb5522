//! Tests for catalog module

use super::*;

#[test]
fn test_calculate_cost() {
    let model = ModelDescriptor::new(Provider::OpenAi, "test-model", 5, 5, 10.0, 20.0);

    // 1M tokens each
    let cost = model.calculate_cost(1_000_000, 1_000_000);
    assert!((cost - 30.0).abs() < 0.001);

    // 1K tokens each
    let cost = model.calculate_cost(1_000, 1_000);
    assert!((cost - 0.03).abs() < 0.001);
}

#[test]
fn test_estimated_cost_uses_assumed_token_mix() {
    let model = ModelDescriptor::new(Provider::Anthropic, "m", 5, 5, 3.0, 15.0);
    // 500 * 3 / 1e6 + 150 * 15 / 1e6
    assert!((model.estimated_cost() - 0.00375).abs() < 1e-9);
}

#[test]
fn test_negative_prices_are_clamped() {
    let model = ModelDescriptor::new(Provider::Groq, "free", 1, 1, -1.0, -2.0);
    assert_eq!(model.estimated_cost(), 0.0);
}

#[test]
fn test_descriptor_id_format() {
    let model = ModelDescriptor::new(Provider::Google, "gemini-2.5-pro", 9, 5, 1.25, 15.0);
    assert_eq!(model.id, "google/gemini-2.5-pro");
    assert_eq!(model.model, "gemini-2.5-pro");
}

#[test]
fn test_provider_parsing() {
    assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
    assert_eq!("Anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
    assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Google);
    assert!("acme".parse::<Provider>().is_err());
    assert_eq!(Provider::DeepSeek.to_string(), "deepseek");
}

#[test]
fn test_provider_serializes_as_id_prefix() {
    for provider in Provider::ALL {
        let json = serde_json::to_value(provider).unwrap();
        assert_eq!(json, provider.as_str());
        assert_eq!(serde_json::from_value::<Provider>(json).unwrap(), provider);
    }
}

#[test]
fn test_every_preference_entry_is_in_catalog() {
    let catalog = ModelCatalog::default();
    for category in PromptCategory::ALL {
        for priority in Priority::ALL {
            let prefs = catalog.preferences(category, priority);
            assert!(!prefs.is_empty(), "{category}/{priority} has no preferences");
            for id in prefs {
                assert!(catalog.get(id).is_some(), "unknown model {id}");
            }
        }
    }
}

#[test]
fn test_cost_lists_are_cheapest_first() {
    let catalog = ModelCatalog::default();
    for category in PromptCategory::ALL {
        let costs: Vec<f64> = catalog
            .preferences(category, Priority::Cost)
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(ModelDescriptor::estimated_cost)
            .collect();
        assert!(
            costs.windows(2).all(|w| w[0] <= w[1]),
            "{category} cost list is not ascending: {costs:?}"
        );
    }
}

#[test]
fn test_every_provider_has_models() {
    let catalog = ModelCatalog::default();
    for provider in Provider::ALL {
        assert!(
            catalog.models().iter().any(|m| m.provider == provider),
            "{provider} has no models"
        );
    }
    assert_eq!(catalog.len(), 16);
}

#[test]
fn test_models_sorted_by_id() {
    let catalog = ModelCatalog::default();
    let ids: Vec<&str> = catalog.models().iter().map(|m| m.id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_unknown_preferences_are_empty() {
    let catalog = ModelCatalog::new(Vec::new(), Default::default());
    assert!(catalog.is_empty());
    assert!(catalog
        .preferences(PromptCategory::Analysis, Priority::Quality)
        .is_empty());
}
