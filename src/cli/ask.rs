//! `ask` command

use super::AskArgs;
use crate::app::{AppConfig, Engine};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use switchyard_llm::{
    ExecutionError, ExecutionOutcome, Priority, Provider, ProviderHealthState, UsageStats,
};

/// Result of one run plus the health and usage state it left behind
#[derive(Serialize)]
struct AskReport {
    outcome: ExecutionOutcome,
    health: BTreeMap<Provider, ProviderHealthState>,
    usage: UsageStats,
}

pub async fn run(config: &AppConfig, args: &AskArgs) -> Result<()> {
    let engine = Engine::from_config(config)?;
    let priority = args.priority.unwrap_or(config.routing.default_priority);

    let report = match ask(&engine, &args.prompt.text(), priority).await {
        Ok(report) => report,
        Err((err, health, usage)) => {
            if let Some(decision) = &err.decision {
                eprintln!("Last routing decision:");
                super::route::print_decision(decision);
            }
            eprintln!();
            print_run_summary(&health, &usage);
            return Err(anyhow::Error::new(err).context("Prompt execution failed"));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let outcome = &report.outcome;
    println!("{}", outcome.content);
    println!();
    println!(
        "-- {} ({}) | {} ms | ${:.6} | {} attempt(s)",
        outcome.model, outcome.provider, outcome.latency_ms, outcome.actual_cost, outcome.attempts
    );
    if outcome.attempts > 1 {
        print_run_summary(&report.health, &report.usage);
    }
    Ok(())
}

type AskFailure = (
    ExecutionError,
    BTreeMap<Provider, ProviderHealthState>,
    UsageStats,
);

async fn ask(
    engine: &Engine,
    text: &str,
    priority: Priority,
) -> std::result::Result<AskReport, AskFailure> {
    let result = engine
        .executor
        .execute(text, priority, Some(&engine.overrides))
        .await;
    let health = engine.router().health().snapshot();
    let usage = engine.cost_tracker.get_stats(None).await;

    match result {
        Ok(outcome) => Ok(AskReport {
            outcome,
            health,
            usage,
        }),
        Err(err) => Err((err, health, usage)),
    }
}

/// Attempts per provider and any health state the run left behind
fn print_run_summary(health: &BTreeMap<Provider, ProviderHealthState>, usage: &UsageStats) {
    eprintln!(
        "Attempts: {} ({} exhausted, {} failed), total ${:.6}",
        usage.attempts, usage.exhausted, usage.failed, usage.total_cost
    );
    for (provider, stats) in &usage.by_provider {
        let provider = provider.as_str();
        eprintln!(
            "  {provider:<10} {} attempt(s), {} ok, {} exhausted, {} failed",
            stats.attempts, stats.succeeded, stats.exhausted, stats.failed
        );
    }
    let now = Utc::now();
    for (provider, state) in health {
        let provider = provider.as_str();
        match state.cooldown_until {
            Some(until) if until > now => eprintln!(
                "  {provider:<10} cooling down until {} ({} failure(s))",
                until.to_rfc3339(),
                state.failure_count
            ),
            _ if state.failure_count > 0 => eprintln!(
                "  {provider:<10} {} failure(s) since last success",
                state.failure_count
            ),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchyard_llm::{Error, MockCompletionService, ProviderCredentials};

    #[tokio::test]
    async fn test_report_carries_health_and_usage() {
        let service = MockCompletionService::new();
        service.push_error(Error::Api("429 rate limit exceeded for anthropic".to_string()));
        let engine = Engine::with_service(
            &AppConfig::default(),
            ProviderCredentials::all(),
            Arc::new(service),
        )
        .unwrap();

        let report = ask(&engine, "def foo(): pass, fix this bug", Priority::Quality)
            .await
            .map_err(|(err, _, _)| err)
            .unwrap();

        assert_eq!(report.outcome.attempts, 2);
        assert_eq!(report.health[&Provider::Anthropic].failure_count, 1);
        assert_eq!(report.usage.attempts, 2);
        assert_eq!(report.usage.by_provider[&Provider::Anthropic].exhausted, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["health"]["anthropic"]["failure_count"], 1);
        assert_eq!(json["usage"]["exhausted"], 1);
        assert_eq!(json["outcome"]["attempts"], 2);
    }

    #[tokio::test]
    async fn test_failed_run_still_reports_usage() {
        let service = MockCompletionService::failing("500 internal server error");
        let engine = Engine::with_service(
            &AppConfig::default(),
            ProviderCredentials::all(),
            Arc::new(service),
        )
        .unwrap();

        let Err((err, health, usage)) = ask(&engine, "hello there", Priority::Cost).await else {
            panic!("expected the run to fail");
        };
        assert_eq!(err.attempts, 1);
        assert_eq!(usage.failed, 1);
        assert_eq!(health.values().map(|s| s.failure_count).sum::<u32>(), 1);
    }
}
