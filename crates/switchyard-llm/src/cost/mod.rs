//! Cost tracking
//!
//! The fallback executor records every completion attempt here: which
//! execution and category it served, its attempt number, the provider it
//! was attributed to and how it ended. Prices come from the model catalog.
//! Records live in process memory only.

mod record;
mod tracker;


pub use record::{AttemptOutcome, CategoryStats, ProviderStats, UsageRecord, UsageStats};
pub use tracker::{CostTracker, DEFAULT_MAX_RECORDS};
