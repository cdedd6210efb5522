//! `status` command
//!
//! Shows what a fresh process would route with: credentials, gateway and
//! routing configuration. Provider health and usage live in process
//! memory, so they are reported by `ask` after each run instead.

use crate::app::AppConfig;
use anyhow::Result;
use switchyard_llm::{Provider, ProviderCredentials};

pub fn run(config: &AppConfig) -> Result<()> {
    println!("Switchyard v{}\n", env!("CARGO_PKG_VERSION"));

    let credentials = ProviderCredentials::from_env();
    println!("Provider credentials:");
    for provider in Provider::ALL {
        let mark = if credentials.has(provider) { "✅" } else { "❌" };
        println!(
            "  {mark} {:<10} {}",
            provider.as_str(),
            provider.credential_env_var()
        );
    }

    let gateway = config.gateway_config();
    println!("\nGateway:");
    println!("  endpoint: {}", gateway.endpoint());
    if gateway.has_api_key() {
        println!("  ✅ {} set", switchyard_llm::gateway::API_KEY_ENV);
    } else {
        println!("  ❌ {} not set", switchyard_llm::gateway::API_KEY_ENV);
    }

    println!("\nRouting:");
    println!("  default priority: {}", config.routing.default_priority);
    println!("  max attempts:     {}", config.routing.max_attempts);
    println!("  call timeout:     {}s", config.routing.call_timeout_secs);
    let overrides = config.custom_overrides()?;
    if !overrides.is_empty() {
        println!("  overrides:        {} categor(y/ies)", config.overrides.len());
    }

    println!("\nCircuit breaker (configuration only):");
    println!(
        "  cooldown after {} failure(s) for {}s",
        config.health.failure_threshold, config.health.cooldown_secs
    );

    if credentials.is_empty() {
        println!(
            "\n⚠️  No provider credentials configured; set one of: {}",
            credentials.missing_variables().join(", ")
        );
    }
    Ok(())
}
