//! Fallback executor

use super::signatures::{blame_provider, is_provider_exhaustion};
use super::{ExecutionError, ExecutionOutcome, FallbackConfig};
use crate::catalog::{ModelCatalog, ModelDescriptor, Provider};
use crate::classifier::classify;
use crate::completion::{CompletionRequest, CompletionResult};
use crate::cost::{AttemptOutcome, CostTracker, UsageRecord};
use crate::error::{Error, Result};
use crate::router::{CompletionService, CustomOverrides, Priority, Router, RoutingDecision};
use crate::util::preview;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Runs prompts through the router and the completion service with
/// provider fallback
#[derive(Clone)]
pub struct FallbackExecutor {
    router: Router,
    service: Arc<dyn CompletionService>,
    cost_tracker: Option<Arc<CostTracker>>,
    config: FallbackConfig,
}

impl std::fmt::Debug for FallbackExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackExecutor")
            .field("router", &self.router)
            .field("service", &self.service.name())
            .field("cost_tracker", &self.cost_tracker.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl FallbackExecutor {
    /// Create an executor with the default configuration
    #[must_use]
    pub fn new(router: Router, service: Arc<dyn CompletionService>) -> Self {
        Self {
            router,
            service,
            cost_tracker: None,
            config: FallbackConfig::default(),
        }
    }

    /// Set the configuration
    #[must_use]
    pub fn with_config(mut self, config: FallbackConfig) -> Self {
        self.config = config;
        self
    }

    /// Record every attempt in a cost tracker
    #[must_use]
    pub fn with_cost_tracker(mut self, tracker: Arc<CostTracker>) -> Self {
        self.cost_tracker = Some(tracker);
        self
    }

    /// Get the router
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Get the attached cost tracker
    #[must_use]
    pub fn cost_tracker(&self) -> Option<&Arc<CostTracker>> {
        self.cost_tracker.as_ref()
    }

    /// Complete a prompt, re-routing around exhausted providers
    ///
    /// Makes at most `max_attempts` completion calls. Input errors, missing
    /// credentials and empty routes return before any call is made.
    #[instrument(skip_all, fields(priority = %priority))]
    pub async fn execute(
        &self,
        prompt: &str,
        priority: Priority,
        overrides: Option<&CustomOverrides>,
    ) -> std::result::Result<ExecutionOutcome, ExecutionError> {
        if prompt.trim().is_empty() {
            return Err(ExecutionError::new(
                Error::InvalidInput("prompt is empty".to_string()),
                None,
                0,
            ));
        }

        let execution_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let category = classify(prompt);
        let budget = category.default_token_budget();

        info!(
            execution_id = %execution_id,
            category = %category,
            prompt = %preview(prompt),
            "Executing prompt"
        );

        let mut excluded: Vec<Provider> = Vec::new();
        let mut attempts: u32 = 0;

        loop {
            let decision = self.router.route(category, priority, &excluded, overrides);

            let Some(primary) = decision.primary().map(|m| m.provider) else {
                let error = Error::NoRoute {
                    category,
                    priority,
                    excluded: excluded.clone(),
                    missing_credentials: self.router.credentials().missing_variables(),
                };
                warn!(
                    execution_id = %execution_id,
                    attempts,
                    error = %error,
                    "No route"
                );
                return Err(ExecutionError::new(error, Some(decision), attempts));
            };

            if let Some(variable) = self.service.missing_credential() {
                let error = Error::NotConfigured(format!(
                    "{variable} is not set; {} cannot be called",
                    self.service.name()
                ));
                return Err(ExecutionError::new(error, Some(decision), attempts));
            }

            attempts += 1;
            let request =
                CompletionRequest::new(prompt, decision.model_ids()).with_budget(budget);
            debug!(
                execution_id = %execution_id,
                attempt = attempts,
                candidates = ?request.candidates,
                "Calling completion service"
            );

            let call_started = Instant::now();
            let result = self.call(request).await;
            let call_latency_ms = call_started.elapsed().as_millis() as u64;

            let error = match result {
                Ok(result) => {
                    let outcome = self
                        .succeed(
                            result,
                            decision,
                            primary,
                            attempts,
                            &execution_id,
                            call_latency_ms,
                            started,
                        )
                        .await;
                    return Ok(outcome);
                }
                Err(error) => error,
            };

            let message = error.to_string();
            let blamed = blame_provider(&message, &decision.selected_models).unwrap_or(primary);
            self.router.health().report_failure_with(blamed, &message);

            let exhausted = !matches!(error, Error::Timeout(_)) && is_provider_exhaustion(&message);
            let reroute =
                exhausted && !excluded.contains(&blamed) && attempts < self.config.max_attempts;
            let outcome = if reroute {
                AttemptOutcome::Exhausted
            } else {
                AttemptOutcome::Failed
            };
            self.record(
                UsageRecord::attempt(
                    &execution_id,
                    category,
                    attempts,
                    blamed,
                    blamed_model(&decision, blamed),
                )
                .with_latency(call_latency_ms)
                .with_outcome(outcome),
            )
            .await;

            if reroute {
                warn!(
                    execution_id = %execution_id,
                    provider = %blamed,
                    attempt = attempts,
                    error = %message,
                    "Provider exhausted, re-routing without it"
                );
                excluded.push(blamed);
                continue;
            }

            warn!(
                execution_id = %execution_id,
                provider = %blamed,
                attempt = attempts,
                error = %message,
                "Execution failed"
            );
            return Err(ExecutionError::new(error, Some(decision), attempts));
        }
    }

    async fn call(&self, request: CompletionRequest) -> Result<CompletionResult> {
        match self.config.call_timeout {
            Some(limit) => tokio::time::timeout(limit, self.service.complete(request))
                .await
                .map_err(|_| Error::Timeout(limit.as_millis() as u64))?,
            None => self.service.complete(request).await,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn succeed(
        &self,
        result: CompletionResult,
        decision: RoutingDecision,
        primary: Provider,
        attempts: u32,
        execution_id: &str,
        call_latency_ms: u64,
        started: Instant,
    ) -> ExecutionOutcome {
        let used = resolve_used_model(&result.model, &decision, self.router.catalog());

        let provider = used
            .as_ref()
            .map(|m| m.provider)
            .or_else(|| provider_prefix(&result.model))
            .unwrap_or(primary);

        let actual_cost = match (&used, &result.usage) {
            (Some(model), Some(usage)) => {
                model.calculate_cost(usage.input_tokens, usage.output_tokens)
            }
            _ => decision.estimated_cost,
        };

        self.router.health().report_success(provider);

        let model = used.map_or_else(|| result.model.clone(), |m| m.id);
        self.record(
            UsageRecord::attempt(execution_id, decision.category, attempts, provider, &model)
                .with_usage(result.usage)
                .with_latency(call_latency_ms),
        )
        .await;

        let latency_ms = started.elapsed().as_millis() as u64;
        info!(
            execution_id = %execution_id,
            provider = %provider,
            model = %model,
            attempts,
            latency_ms,
            actual_cost,
            "Execution succeeded"
        );

        ExecutionOutcome {
            execution_id: execution_id.to_string(),
            content: result.content,
            model,
            provider,
            actual_cost,
            latency_ms,
            attempts,
            decision,
        }
    }

    async fn record(&self, record: UsageRecord) {
        if let Some(tracker) = &self.cost_tracker {
            tracker.record(record).await;
        }
    }
}

/// Catalog model behind the name the service reports
///
/// Gateways may answer with the catalog id, the provider-side name, a
/// vendor-prefixed name or a dated variant such as `gpt-5-nano-2025-08-07`.
/// Exact names are tried across candidates and then the catalog before any
/// dated-variant match. A `provider/` prefix must agree with the match.
fn resolve_used_model(
    reported: &str,
    decision: &RoutingDecision,
    catalog: &ModelCatalog,
) -> Option<ModelDescriptor> {
    let name = reported.rsplit_once('/').map_or(reported, |(_, name)| name);
    let prefix = provider_prefix(reported);
    let pool: Vec<&ModelDescriptor> = decision
        .selected_models
        .iter()
        .chain(catalog.models())
        .filter(|m| prefix.map_or(true, |p| m.provider == p))
        .collect();

    pool.iter()
        .find(|m| m.id == reported)
        .or_else(|| pool.iter().find(|m| m.model == name))
        .or_else(|| {
            let name = name.replace('.', "-");
            pool.iter()
                .filter(|m| is_dated_variant(&name, &m.model.replace('.', "-")))
                .max_by_key(|m| m.model.len())
        })
        .map(|m| (*m).clone())
}

/// `name` is `base` followed by `-` and a date or version number
fn is_dated_variant(name: &str, base: &str) -> bool {
    name.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// First candidate served by the blamed provider, else the first candidate
fn blamed_model(decision: &RoutingDecision, provider: Provider) -> &str {
    decision
        .selected_models
        .iter()
        .find(|m| m.provider == provider)
        .or_else(|| decision.primary())
        .map_or("", |m| m.id.as_str())
}

/// Provider named by a `provider/model` id
fn provider_prefix(model: &str) -> Option<Provider> {
    model
        .split_once('/')
        .and_then(|(provider, _)| provider.parse().ok())
}
