//! Engine construction
//!
//! Builds the shared catalog, health tracker, router and fallback executor
//! from the loaded configuration.

use super::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use switchyard_llm::{
    CompletionService, CostTracker, CustomOverrides, FallbackExecutor, GatewayService,
    HealthTracker, ModelCatalog, ProviderCredentials, Router,
};
use tracing::info;

/// Everything a command needs to route and execute prompts
pub struct Engine {
    pub executor: FallbackExecutor,
    pub cost_tracker: Arc<CostTracker>,
    pub overrides: CustomOverrides,
}

impl Engine {
    /// Build from configuration, credentials from the environment and the
    /// gateway completion service
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let service =
            GatewayService::new(config.gateway_config()).context("Failed to create gateway")?;
        Self::with_service(config, ProviderCredentials::from_env(), Arc::new(service))
    }

    /// Build with explicit credentials and completion service
    pub fn with_service(
        config: &AppConfig,
        credentials: ProviderCredentials,
        service: Arc<dyn CompletionService>,
    ) -> Result<Self> {
        let router = build_router(config, credentials);
        let cost_tracker = Arc::new(CostTracker::with_catalog(router.catalog().clone()));
        let overrides = config.custom_overrides()?;

        info!(
            models = router.catalog().len(),
            providers = ?router.credentials().providers(),
            service = service.name(),
            "Routing engine ready"
        );

        let executor = FallbackExecutor::new(router, service)
            .with_config(config.fallback_config())
            .with_cost_tracker(cost_tracker.clone());

        Ok(Self {
            executor,
            cost_tracker,
            overrides,
        })
    }

    /// Get the router
    pub fn router(&self) -> &Router {
        self.executor.router()
    }
}

/// Router over the default catalog with a fresh health tracker
///
/// Enough for commands that only inspect routing decisions; no completion
/// service or HTTP client is created.
pub fn build_router(config: &AppConfig, credentials: ProviderCredentials) -> Router {
    let catalog = Arc::new(ModelCatalog::default());
    let health = Arc::new(HealthTracker::with_config(config.health_config()));
    Router::new(catalog, health, credentials)
}
