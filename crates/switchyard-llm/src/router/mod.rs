//! Router - candidate selection for a prompt category and priority
//!
//! This module turns a (category, priority) pair into an ordered list of
//! candidate models, honoring credentials, exclusions, provider health and
//! caller overrides. It also defines the seam to the external completion
//! service.
//!
//! # Module Structure
//!
//! - `types`: Core types (PromptCategory, Priority)
//! - `rules`: Caller-supplied custom overrides
//! - `candidates`: Pure candidate-list construction
//! - `decision`: RoutingDecision
//! - `provider`: CompletionService trait definition
//! - `mock`: Scripted completion service for testing
//! - `router_impl`: Router implementation

mod candidates;
mod decision;
mod mock;
mod provider;
mod router_impl;
mod rules;
mod types;


pub use candidates::{build_candidates, MAX_CANDIDATES, MIN_CANDIDATES};
pub use decision::RoutingDecision;
pub use mock::MockCompletionService;
pub use provider::CompletionService;
pub use router_impl::Router;
pub use rules::CustomOverrides;
pub use types::{Priority, PromptCategory};
