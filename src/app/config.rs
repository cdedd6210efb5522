//! Application configuration types

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use switchyard_llm::{
    CustomOverrides, FallbackConfig, GatewayConfig, HealthConfig, Priority, PromptCategory,
};

/// Longest accepted provider cooldown (one year)
const MAX_COOLDOWN_SECS: u64 = 365 * 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub health: HealthSettings,
    #[serde(default)]
    pub gateway: GatewaySettings,
    /// Category name -> ordered model ids
    #[serde(default)]
    pub overrides: HashMap<String, Vec<String>>,
}

/// `[routing]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub default_priority: Priority,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// 0 disables the per-call timeout
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::default(),
            max_attempts: default_max_attempts(),
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}
fn default_call_timeout_secs() -> u64 {
    60
}

/// `[health]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSettings {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

fn default_failure_threshold() -> u32 {
    3
}
fn default_cooldown_secs() -> u64 {
    300
}

/// `[gateway]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_gateway_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub app_name: Option<String>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_gateway_timeout_secs(),
            app_name: None,
        }
    }
}

fn default_base_url() -> String {
    switchyard_llm::gateway::BASE_URL.to_string()
}
fn default_gateway_timeout_secs() -> u64 {
    60
}

impl AppConfig {
    /// Fallback loop settings
    pub fn fallback_config(&self) -> FallbackConfig {
        let config = FallbackConfig::new().with_max_attempts(self.routing.max_attempts);
        match self.routing.call_timeout_secs {
            0 => config.without_call_timeout(),
            secs => config.with_call_timeout(Duration::from_secs(secs)),
        }
    }

    /// Health tracker thresholds
    pub fn health_config(&self) -> HealthConfig {
        let cooldown_secs = self.health.cooldown_secs.min(MAX_COOLDOWN_SECS) as i64;
        HealthConfig::new()
            .with_failure_threshold(self.health.failure_threshold)
            .with_cooldown(chrono::Duration::seconds(cooldown_secs))
    }

    /// Gateway settings; `AI_GATEWAY_BASE_URL` wins over the file
    pub fn gateway_config(&self) -> GatewayConfig {
        let env_base_url = std::env::var(switchyard_llm::gateway::BASE_URL_ENV).ok();
        let mut config = GatewayConfig::from_env()
            .with_timeout(Duration::from_secs(self.gateway.timeout_secs.max(1)));
        if env_base_url.is_none() {
            config = config.with_base_url(self.gateway.base_url.clone());
        }
        if let Some(app_name) = &self.gateway.app_name {
            config = config.with_app_name(app_name.clone());
        }
        config
    }

    /// Parsed `[overrides]` section
    pub fn custom_overrides(&self) -> Result<CustomOverrides> {
        let mut overrides = CustomOverrides::new();
        for (name, models) in &self.overrides {
            let category: PromptCategory = name
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid [overrides] key '{name}'"))?;
            overrides.set(category, models.clone());
        }
        Ok(overrides)
    }
}
