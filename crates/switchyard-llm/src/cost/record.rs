//! Attempt records and the statistics built from them

use crate::catalog::Provider;
use crate::completion::TokenUsage;
use crate::router::PromptCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How a completion attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The service returned a completion
    Succeeded,
    /// Billing, quota or rate-limit failure; the provider was excluded and
    /// the prompt re-routed
    Exhausted,
    /// Failure that ended the execution
    Failed,
}

impl AttemptOutcome {
    /// Whether the attempt produced a completion
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// One completion attempt made by the fallback executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Assigned by the tracker, starting at 1
    pub id: u64,
    /// When the attempt was recorded
    pub timestamp: DateTime<Utc>,
    /// Execution this attempt belongs to
    pub execution_id: String,
    /// Category the prompt was classified into
    pub category: PromptCategory,
    /// 1-based attempt number within the execution
    pub attempt: u32,
    /// Provider that served (or was blamed for) the attempt
    pub provider: Provider,
    /// Catalog id when known, otherwise the name the service reported
    pub model: String,
    /// Reported input tokens, 0 when unknown
    pub input_tokens: u32,
    /// Reported output tokens, 0 when unknown
    pub output_tokens: u32,
    /// Priced by the tracker from the catalog (USD)
    pub cost: f64,
    /// Wall time of the service call
    pub latency_ms: u64,
    /// How the attempt ended
    pub outcome: AttemptOutcome,
}

impl UsageRecord {
    /// Start a record for an attempt; the tracker fills in id, timestamp
    /// and cost when it is recorded
    #[must_use]
    pub fn attempt(
        execution_id: impl Into<String>,
        category: PromptCategory,
        attempt: u32,
        provider: Provider,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            execution_id: execution_id.into(),
            category,
            attempt,
            provider,
            model: model.into(),
            input_tokens: 0,
            output_tokens: 0,
            cost: 0.0,
            latency_ms: 0,
            outcome: AttemptOutcome::Succeeded,
        }
    }

    /// Set the reported token usage
    #[must_use]
    pub fn with_usage(mut self, usage: Option<TokenUsage>) -> Self {
        let usage = usage.unwrap_or_default();
        self.input_tokens = usage.input_tokens;
        self.output_tokens = usage.output_tokens;
        self
    }

    /// Set the call latency
    #[must_use]
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set how the attempt ended
    #[must_use]
    pub fn with_outcome(mut self, outcome: AttemptOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Input plus output tokens
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        u64::from(self.input_tokens) + u64::from(self.output_tokens)
    }
}

/// Aggregated view over a set of attempts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageStats {
    /// Distinct executions the attempts belong to
    pub executions: u64,
    /// Completion calls made
    pub attempts: u64,
    /// Calls that returned a completion
    pub succeeded: u64,
    /// Attempts that triggered a re-route
    pub exhausted: u64,
    /// Attempts that ended an execution with an error
    pub failed: u64,
    /// Input tokens across all attempts
    pub total_input_tokens: u64,
    /// Output tokens across all attempts
    pub total_output_tokens: u64,
    /// USD
    pub total_cost: f64,
    /// Mean call latency over all attempts
    pub avg_latency_ms: f64,
    /// Per-provider breakdown
    pub by_provider: BTreeMap<Provider, ProviderStats>,
    /// Per-category breakdown
    pub by_category: BTreeMap<PromptCategory, CategoryStats>,
}

impl UsageStats {
    /// Share of attempts that succeeded, 0 when nothing was recorded
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        ratio(self.succeeded, self.attempts)
    }

    /// Mean number of attempts per execution
    #[must_use]
    pub fn attempts_per_execution(&self) -> f64 {
        ratio(self.attempts, self.executions)
    }

    pub(crate) fn from_records<'a>(records: impl Iterator<Item = &'a UsageRecord>) -> Self {
        let mut stats = Self::default();
        let mut executions = BTreeSet::new();
        let mut total_latency: u64 = 0;

        for record in records {
            executions.insert(record.execution_id.as_str());
            stats.attempts += 1;
            match record.outcome {
                AttemptOutcome::Succeeded => stats.succeeded += 1,
                AttemptOutcome::Exhausted => stats.exhausted += 1,
                AttemptOutcome::Failed => stats.failed += 1,
            }
            stats.total_input_tokens += u64::from(record.input_tokens);
            stats.total_output_tokens += u64::from(record.output_tokens);
            stats.total_cost += record.cost;
            total_latency += record.latency_ms;

            stats
                .by_provider
                .entry(record.provider)
                .or_default()
                .add(record);

            let category = stats.by_category.entry(record.category).or_default();
            category.attempts += 1;
            category.total_cost += record.cost;
            if record.outcome.is_success() {
                category.succeeded += 1;
            }
        }

        stats.executions = executions.len() as u64;
        if stats.attempts > 0 {
            stats.avg_latency_ms = total_latency as f64 / stats.attempts as f64;
        }
        stats
    }
}

/// Attempts served by (or blamed on) one provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderStats {
    /// Attempts attributed to the provider
    pub attempts: u64,
    /// Successful attempts
    pub succeeded: u64,
    /// Exhaustion failures
    pub exhausted: u64,
    /// Terminal failures
    pub failed: u64,
    /// Input plus output tokens
    pub total_tokens: u64,
    /// USD
    pub total_cost: f64,
    /// Successful attempts only
    pub avg_success_latency_ms: f64,
}

impl ProviderStats {
    fn add(&mut self, record: &UsageRecord) {
        self.attempts += 1;
        self.total_tokens += record.total_tokens();
        self.total_cost += record.cost;
        match record.outcome {
            AttemptOutcome::Succeeded => {
                let previous = self.avg_success_latency_ms * self.succeeded as f64;
                self.succeeded += 1;
                self.avg_success_latency_ms =
                    (previous + record.latency_ms as f64) / self.succeeded as f64;
            }
            AttemptOutcome::Exhausted => self.exhausted += 1,
            AttemptOutcome::Failed => self.failed += 1,
        }
    }
}

/// Attempts made for prompts of one category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Attempts made
    pub attempts: u64,
    /// Successful attempts
    pub succeeded: u64,
    /// USD
    pub total_cost: f64,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
