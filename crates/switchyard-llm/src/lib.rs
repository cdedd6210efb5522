//! Switchyard LLM - Prompt routing and provider fallback
//!
//! This crate provides the routing engine for Switchyard:
//! - Classifier: Rule-based prompt categorization
//! - Catalog: Model descriptors, prices and per-priority preference lists
//! - Health: Per-provider failure counting and cooldown (circuit breaker)
//! - Router: Candidate selection for a category and priority
//! - Fallback: Bounded retry loop that re-routes around exhausted providers
//! - Gateway: OpenAI-compatible multi-provider completion service
//! - Cost: In-memory usage and cost tracking

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod classifier;
pub mod completion;
pub mod cost;
pub mod credentials;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod health;
pub mod router;
pub mod util;

pub use catalog::{ModelCatalog, ModelDescriptor, Provider};
pub use classifier::{classify, classify_with_rule, Classification};
pub use completion::{CompletionRequest, CompletionResult, TokenBudget, TokenUsage};
pub use cost::{AttemptOutcome, CostTracker, UsageRecord, UsageStats};
pub use credentials::ProviderCredentials;
pub use error::{Error, Result};
pub use fallback::{ExecutionError, ExecutionOutcome, FallbackConfig, FallbackExecutor};
pub use gateway::{GatewayConfig, GatewayService};
pub use health::{HealthConfig, HealthTracker, ProviderHealthState};
pub use router::{
    build_candidates, CompletionService, CustomOverrides, MockCompletionService, Priority,
    PromptCategory, Router, RoutingDecision,
};
