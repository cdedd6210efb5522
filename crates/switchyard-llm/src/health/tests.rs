use super::*;
use std::sync::Arc;

#[test]
fn test_health_config_defaults() {
    let config = HealthConfig::default();
    assert_eq!(config.failure_threshold, 3);
    assert_eq!(config.cooldown, Duration::minutes(5));
}

#[test]
fn test_health_config_builder() {
    let config = HealthConfig::new()
        .with_failure_threshold(5)
        .with_cooldown(Duration::seconds(30));

    assert_eq!(config.failure_threshold, 5);
    assert_eq!(config.cooldown, Duration::seconds(30));

    // A zero threshold would put every provider into permanent cooldown
    assert_eq!(HealthConfig::new().with_failure_threshold(0).failure_threshold, 1);
}

#[test]
fn test_unknown_provider_is_available() {
    let tracker = HealthTracker::new();
    assert!(tracker.is_available(Provider::OpenAi));
    assert!(tracker.state(Provider::OpenAi).is_none());
    assert!(tracker.snapshot().is_empty());
}

#[test]
fn test_failures_below_threshold_keep_provider_available() {
    let tracker = HealthTracker::new();
    tracker.report_failure(Provider::Groq);
    let state = tracker.report_failure(Provider::Groq);

    assert_eq!(state.failure_count, 2);
    assert!(state.cooldown_until.is_none());
    assert!(tracker.is_available(Provider::Groq));
}

#[test]
fn test_circuit_breaker_round_trip() {
    let tracker = HealthTracker::new();

    tracker.report_failure(Provider::Anthropic);
    tracker.report_failure(Provider::Anthropic);
    tracker.report_failure(Provider::Anthropic);
    assert!(!tracker.is_available(Provider::Anthropic));

    tracker.report_success(Provider::Anthropic);
    assert!(tracker.is_available(Provider::Anthropic));

    let state = tracker.state(Provider::Anthropic).unwrap();
    assert_eq!(state.failure_count, 0);
    assert!(state.cooldown_until.is_none());
}

#[test]
fn test_cooldown_expires() {
    let tracker = HealthTracker::new();
    let start = Utc::now();

    for _ in 0..3 {
        tracker.report_failure_at(Provider::Google, Some("503"), start);
    }

    assert!(!tracker.is_available_at(Provider::Google, start + Duration::minutes(4)));
    assert!(tracker.is_available_at(Provider::Google, start + Duration::minutes(5)));
    assert!(tracker.is_available_at(Provider::Google, start + Duration::minutes(6)));
}

#[test]
fn test_failures_past_threshold_extend_cooldown() {
    let tracker = HealthTracker::new();
    let start = Utc::now();

    for _ in 0..3 {
        tracker.report_failure_at(Provider::Mistral, None, start);
    }
    let later = start + Duration::minutes(2);
    let state = tracker.report_failure_at(Provider::Mistral, None, later);

    assert_eq!(state.failure_count, 4);
    assert_eq!(state.cooldown_until, Some(later + Duration::minutes(5)));
}

#[test]
fn test_success_resets_any_failure_count() {
    let tracker = HealthTracker::new();
    for _ in 0..10 {
        tracker.report_failure(Provider::DeepSeek);
    }
    tracker.report_success(Provider::DeepSeek);

    assert!(tracker.is_available(Provider::DeepSeek));
    assert_eq!(tracker.state(Provider::DeepSeek).unwrap().failure_count, 0);
}

#[test]
fn test_success_for_unknown_provider_creates_no_state() {
    let tracker = HealthTracker::new();
    tracker.report_success(Provider::OpenAi);
    assert!(tracker.state(Provider::OpenAi).is_none());
}

#[test]
fn test_providers_are_independent() {
    let tracker = HealthTracker::new();
    for _ in 0..3 {
        tracker.report_failure(Provider::OpenAi);
    }

    assert!(!tracker.is_available(Provider::OpenAi));
    assert!(tracker.is_available(Provider::Anthropic));
}

#[test]
fn test_last_error_recorded() {
    let tracker = HealthTracker::new();
    tracker.report_failure_with(Provider::Groq, "429 rate limit exceeded");

    let state = tracker.state(Provider::Groq).unwrap();
    assert_eq!(state.last_error.as_deref(), Some("429 rate limit exceeded"));
    assert!(state.last_failure_at.is_some());
}

#[test]
fn test_snapshot_and_reset() {
    let tracker = HealthTracker::new();
    tracker.report_failure(Provider::OpenAi);
    tracker.report_failure(Provider::Google);

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[&Provider::OpenAi].failure_count, 1);

    tracker.reset();
    assert!(tracker.snapshot().is_empty());
}

#[test]
fn test_custom_threshold() {
    let tracker = HealthTracker::with_config(HealthConfig::new().with_failure_threshold(1));
    tracker.report_failure(Provider::Groq);
    assert!(!tracker.is_available(Provider::Groq));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_failures_are_all_counted() {
    let tracker = Arc::new(HealthTracker::new());
    let mut handles = Vec::new();

    for _ in 0..50 {
        let tracker = Arc::clone(&tracker);
        handles.push(tokio::spawn(async move {
            tracker.report_failure(Provider::OpenAi);
            tracker.is_available(Provider::Anthropic)
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let state = tracker.state(Provider::OpenAi).unwrap();
    assert_eq!(state.failure_count, 50);
    assert!(!tracker.is_available(Provider::OpenAi));
}
