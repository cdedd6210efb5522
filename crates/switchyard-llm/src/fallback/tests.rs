//! Tests for fallback module

use super::*;
use crate::catalog::{ModelCatalog, Provider};
use crate::completion::{CompletionRequest, CompletionResult, TokenUsage};
use crate::cost::{AttemptOutcome, CostTracker};
use crate::credentials::ProviderCredentials;
use crate::error::{Error, Result};
use crate::health::HealthTracker;
use crate::router::{
    CompletionService, CustomOverrides, MockCompletionService, Priority, PromptCategory, Router,
};
use std::sync::Arc;
use std::time::Duration;

const CHAT_PROMPT: &str = "hello there";
const CODE_PROMPT: &str = "def foo(): pass, fix this bug";

fn executor_with(credentials: ProviderCredentials, service: &MockCompletionService) -> FallbackExecutor {
    let router = Router::new(
        Arc::new(ModelCatalog::default()),
        Arc::new(HealthTracker::new()),
        credentials,
    );
    FallbackExecutor::new(router, Arc::new(service.clone()))
}

#[test]
fn test_config_defaults() {
    let config = FallbackConfig::default();
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.call_timeout, Some(Duration::from_secs(60)));

    let config = FallbackConfig::new()
        .with_max_attempts(0)
        .without_call_timeout();
    assert_eq!(config.max_attempts, 1);
    assert!(config.call_timeout.is_none());
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let service = MockCompletionService::new();
    let executor = executor_with(ProviderCredentials::all(), &service);

    let outcome = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap();

    assert_eq!(outcome.content, "mock response");
    assert_eq!(outcome.model, "groq/llama-3.1-8b-instant");
    assert_eq!(outcome.provider, Provider::Groq);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.decision.category, PromptCategory::GeneralChat);
    assert!(!outcome.execution_id.is_empty());
    assert_eq!(service.call_count(), 1);

    let request = &service.requests()[0];
    assert_eq!(request.prompt, CHAT_PROMPT);
    assert_eq!(request.candidates, outcome.decision.model_ids());
    assert_eq!(request.max_tokens, Some(1000));
}

#[tokio::test]
async fn test_actual_cost_uses_reported_usage() {
    let service = MockCompletionService::new();
    service.push_result(
        CompletionResult::new("ok", "openai/gpt-5-nano").with_usage(TokenUsage::new(2000, 1000)),
    );
    let executor = executor_with(ProviderCredentials::all(), &service);

    let outcome = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap();

    let expected = (2000.0 / 1_000_000.0) * 0.05 + (1000.0 / 1_000_000.0) * 0.40;
    assert!((outcome.actual_cost - expected).abs() < 1e-12);
    assert_eq!(outcome.provider, Provider::OpenAi);
    assert_eq!(outcome.model, "openai/gpt-5-nano");
}

#[tokio::test]
async fn test_actual_cost_falls_back_to_estimate() {
    let service = MockCompletionService::new();
    service.push_result(CompletionResult::new("ok", "somewhere/unknown-model"));
    let executor = executor_with(ProviderCredentials::all(), &service);

    let outcome = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap();

    assert!((outcome.actual_cost - outcome.decision.estimated_cost).abs() < 1e-12);
    assert_eq!(outcome.provider, Provider::Groq);
    assert_eq!(outcome.model, "somewhere/unknown-model");
}

#[tokio::test]
async fn test_bare_model_name_credits_the_serving_provider() {
    let service = MockCompletionService::new();
    service.push_result(
        CompletionResult::new("ok", "gpt-5-nano").with_usage(TokenUsage::new(2000, 1000)),
    );
    let executor = executor_with(ProviderCredentials::all(), &service);
    let health = executor.router().health().clone();
    health.report_failure(Provider::OpenAi);
    health.report_failure(Provider::OpenAi);
    health.report_failure(Provider::Groq);

    let outcome = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap();

    let expected = (2000.0 / 1_000_000.0) * 0.05 + (1000.0 / 1_000_000.0) * 0.40;
    assert_eq!(outcome.provider, Provider::OpenAi);
    assert_eq!(outcome.model, "openai/gpt-5-nano");
    assert!((outcome.actual_cost - expected).abs() < 1e-12);
    assert!((outcome.actual_cost - outcome.decision.estimated_cost).abs() > 1e-9);
    assert_eq!(health.state(Provider::OpenAi).map(|s| s.failure_count), Some(0));
    assert_eq!(health.state(Provider::Groq).map(|s| s.failure_count), Some(1));
}

#[tokio::test]
async fn test_dated_model_variants_resolve_to_catalog_models() {
    let cases = [
        ("gpt-5-nano-2025-08-07", "openai/gpt-5-nano"),
        ("openai/gpt-5-nano-2025-08-07", "openai/gpt-5-nano"),
        ("mistral-small-latest", "mistral/mistral-small-latest"),
        ("gpt-5-mini", "openai/gpt-5-mini"),
    ];

    for (reported, expected) in cases {
        let service = MockCompletionService::new();
        service.push_result(CompletionResult::new("ok", reported));
        let executor = executor_with(ProviderCredentials::all(), &service);

        let outcome = executor
            .execute(CHAT_PROMPT, Priority::Cost, None)
            .await
            .unwrap();
        assert_eq!(outcome.model, expected, "reported: {reported}");
    }
}

#[tokio::test]
async fn test_rate_limited_provider_is_excluded_on_retry() {
    let service = MockCompletionService::new();
    service.push_error(Error::Api("429 rate limit exceeded for anthropic".to_string()));
    let executor = executor_with(ProviderCredentials::all(), &service);

    let outcome = executor
        .execute(CODE_PROMPT, Priority::Quality, None)
        .await
        .unwrap();

    let requests = service.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].candidates[0].starts_with("anthropic/"));
    assert!(requests[1]
        .candidates
        .iter()
        .all(|id| !id.starts_with("anthropic/")));
    assert_eq!(
        requests[1].candidates,
        vec![
            "openai/gpt-5".to_string(),
            "google/gemini-2.5-pro".to_string(),
            "deepseek/deepseek-chat".to_string(),
        ]
    );

    let health = executor.router().health();
    assert_eq!(
        health.state(Provider::Anthropic).map(|s| s.failure_count),
        Some(1)
    );
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.provider, Provider::OpenAi);
    assert!(!outcome.decision.providers().contains(&Provider::Anthropic));
}

#[tokio::test]
async fn test_bounded_retries_under_billing_errors() {
    let service = MockCompletionService::failing("402 insufficient credits");
    let executor = executor_with(ProviderCredentials::all(), &service);

    let err = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap_err();

    assert_eq!(service.call_count(), 5);
    assert_eq!(err.attempts, 5);
    assert!(matches!(err.error, Error::Api(ref m) if m == "402 insufficient credits"));
    assert!(err.decision.is_some());

    // Each call went to a different provider
    let primaries: Vec<String> = service
        .requests()
        .iter()
        .map(|r| r.candidates[0].split('/').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        primaries,
        vec!["groq", "openai", "mistral", "deepseek", "google"]
    );
}

#[tokio::test]
async fn test_max_attempts_is_configurable() {
    let service = MockCompletionService::failing("quota exceeded");
    let executor = executor_with(ProviderCredentials::all(), &service)
        .with_config(FallbackConfig::new().with_max_attempts(2));

    let err = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap_err();

    assert_eq!(service.call_count(), 2);
    assert_eq!(err.attempts, 2);
}

#[tokio::test]
async fn test_repeat_blame_of_excluded_provider_is_terminal() {
    let service = MockCompletionService::failing("429 rate limit for groq");
    let executor = executor_with(ProviderCredentials::all(), &service);

    let err = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap_err();

    assert_eq!(service.call_count(), 2);
    assert_eq!(err.attempts, 2);
    assert_eq!(
        executor
            .router()
            .health()
            .state(Provider::Groq)
            .map(|s| s.failure_count),
        Some(2)
    );
}

#[tokio::test]
async fn test_no_credentials_makes_no_call() {
    let service = MockCompletionService::new();
    let executor = executor_with(ProviderCredentials::none(), &service);

    let err = executor
        .execute("Summarize this article in three bullet points", Priority::Cost, None)
        .await
        .unwrap_err();

    assert_eq!(service.call_count(), 0);
    assert_eq!(err.attempts, 0);
    assert!(err.is_no_route());
    let message = err.to_string();
    assert!(message.contains("no models available for summarization with cost priority"));
    assert!(message.contains("OPENAI_API_KEY"));
    assert!(err.decision.as_ref().is_some_and(|d| d.is_empty()));
}

#[tokio::test]
async fn test_missing_service_credential_short_circuits() {
    let service = MockCompletionService::new().with_missing_credential("AI_GATEWAY_API_KEY");
    let executor = executor_with(ProviderCredentials::all(), &service);

    let err = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap_err();

    assert_eq!(service.call_count(), 0);
    assert!(matches!(err.error, Error::NotConfigured(_)));
    assert!(err.to_string().contains("AI_GATEWAY_API_KEY"));
}

#[tokio::test]
async fn test_empty_prompt_is_rejected() {
    let service = MockCompletionService::new();
    let executor = executor_with(ProviderCredentials::all(), &service);

    let err = executor
        .execute("   \n", Priority::Quality, None)
        .await
        .unwrap_err();

    assert!(matches!(err.error, Error::InvalidInput(_)));
    assert!(err.decision.is_none());
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_terminal_error_surfaces_verbatim() {
    let service = MockCompletionService::new();
    service.push_error(Error::Api("500 internal server error".to_string()));
    let executor = executor_with(ProviderCredentials::all(), &service);

    let err = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 1);
    assert_eq!(err.to_string(), "api error: 500 internal server error");
    assert_eq!(
        err.decision.as_ref().and_then(|d| d.primary()).map(|m| m.id.as_str()),
        Some("groq/llama-3.1-8b-instant")
    );
    assert_eq!(
        executor
            .router()
            .health()
            .state(Provider::Groq)
            .map(|s| s.failure_count),
        Some(1)
    );
}

#[tokio::test]
async fn test_success_resets_provider_health() {
    let service = MockCompletionService::new();
    let executor = executor_with(ProviderCredentials::all(), &service);
    let health = executor.router().health().clone();
    health.report_failure(Provider::Groq);
    health.report_failure(Provider::Groq);

    let outcome = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap();

    assert_eq!(outcome.provider, Provider::Groq);
    assert_eq!(health.state(Provider::Groq).map(|s| s.failure_count), Some(0));
}

#[tokio::test]
async fn test_overrides_reach_the_service() {
    let service = MockCompletionService::new();
    let executor = executor_with(ProviderCredentials::all(), &service);
    let overrides = CustomOverrides::new().with(
        PromptCategory::GeneralChat,
        vec!["anthropic/claude-haiku-4.5".to_string()],
    );

    let outcome = executor
        .execute(CHAT_PROMPT, Priority::Cost, Some(&overrides))
        .await
        .unwrap();

    assert_eq!(
        service.requests()[0].candidates,
        vec!["anthropic/claude-haiku-4.5".to_string()]
    );
    assert_eq!(outcome.provider, Provider::Anthropic);
}

#[tokio::test]
async fn test_attempts_are_recorded_in_cost_tracker() {
    let service = MockCompletionService::new();
    service.push_error(Error::Api("429 rate limit exceeded for anthropic".to_string()));
    let tracker = Arc::new(CostTracker::new());
    let executor =
        executor_with(ProviderCredentials::all(), &service).with_cost_tracker(tracker.clone());

    let outcome = executor
        .execute(CODE_PROMPT, Priority::Quality, None)
        .await
        .unwrap();

    let records = tracker.execution_records(&outcome.execution_id).await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].outcome, AttemptOutcome::Exhausted);
    assert_eq!(records[0].provider, Provider::Anthropic);
    assert_eq!(records[0].attempt, 1);
    assert_eq!(records[1].outcome, AttemptOutcome::Succeeded);
    assert_eq!(records[1].attempt, 2);
    assert_eq!(records[1].category, PromptCategory::CodeGeneration);
    assert_eq!(records[1].model, "openai/gpt-5");
    assert!((records[1].cost - outcome.actual_cost).abs() < 1e-12);
}

struct SlowService;

#[async_trait::async_trait]
impl CompletionService for SlowService {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(CompletionResult::new("late", request.candidates[0].clone()))
    }
}

#[tokio::test]
async fn test_call_timeout_is_terminal() {
    let router = Router::new(
        Arc::new(ModelCatalog::default()),
        Arc::new(HealthTracker::new()),
        ProviderCredentials::all(),
    );
    let executor = FallbackExecutor::new(router, Arc::new(SlowService))
        .with_config(FallbackConfig::new().with_call_timeout(Duration::from_millis(20)));

    let err = executor
        .execute(CHAT_PROMPT, Priority::Cost, None)
        .await
        .unwrap_err();

    assert!(matches!(err.error, Error::Timeout(20)));
    assert_eq!(err.attempts, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_executions_share_health() {
    let service = MockCompletionService::failing("500 upstream error from mistral");
    let executor = executor_with(ProviderCredentials::all(), &service);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            executor
                .execute(CHAT_PROMPT, Priority::Cost, None)
                .await
                .is_err()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    // Mistral is blamed by name once per execution
    let state = executor.router().health().state(Provider::Mistral).unwrap();
    assert_eq!(state.failure_count, 8);
    assert!(state.cooldown_until.is_some());
    assert_eq!(service.call_count(), 8);
}
