//! Cost tracker: a bounded in-memory log of completion attempts

use super::record::{UsageRecord, UsageStats};
use crate::catalog::ModelCatalog;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Maximum records to keep in memory by default
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Cost tracker for monitoring completion usage
#[derive(Debug)]
pub struct CostTracker {
    /// Prices come from here
    catalog: Arc<ModelCatalog>,
    /// Usage records, oldest first
    records: RwLock<Vec<UsageRecord>>,
    /// Record ID counter
    next_id: AtomicU64,
    /// Maximum records to keep in memory
    max_records: usize,
}

impl Default for CostTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CostTracker {
    /// Create a new cost tracker priced from the default catalog
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(ModelCatalog::default()))
    }

    /// Create a cost tracker priced from the given catalog
    #[must_use]
    pub fn with_catalog(catalog: Arc<ModelCatalog>) -> Self {
        Self {
            catalog,
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    /// Create with custom max records
    #[must_use]
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max.max(1);
        self
    }

    /// Cost of a call; unknown models cost nothing
    #[must_use]
    pub fn estimate_cost(&self, model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
        self.catalog
            .get(model)
            .map_or(0.0, |m| m.calculate_cost(input_tokens, output_tokens))
    }

    /// Record an attempt
    ///
    /// Assigns the id and timestamp and prices the tokens from the catalog.
    /// The oldest records are dropped once `max_records` is exceeded.
    pub async fn record(&self, mut record: UsageRecord) -> UsageRecord {
        record.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.timestamp = Utc::now();
        record.cost = self.estimate_cost(&record.model, record.input_tokens, record.output_tokens);

        debug!(
            execution_id = %record.execution_id,
            attempt = record.attempt,
            provider = %record.provider,
            model = %record.model,
            cost = record.cost,
            outcome = ?record.outcome,
            "Attempt recorded"
        );

        let mut records = self.records.write().await;
        records.push(record.clone());
        if records.len() > self.max_records {
            let excess = records.len() - self.max_records;
            records.drain(..excess);
        }

        record
    }

    /// Get usage statistics, optionally only for records since an instant
    pub async fn get_stats(&self, since: Option<DateTime<Utc>>) -> UsageStats {
        let records = self.records.read().await;
        UsageStats::from_records(
            records
                .iter()
                .filter(|r| since.map_or(true, |since| r.timestamp >= since)),
        )
    }

    /// Non-blocking stats snapshot
    ///
    /// Returns `None` if the lock is held by a writer.
    pub fn try_get_stats(&self) -> Option<UsageStats> {
        let records = self.records.try_read().ok()?;
        Some(UsageStats::from_records(records.iter()))
    }

    /// Get the most recent records, oldest first
    pub async fn recent_records(&self, limit: usize) -> Vec<UsageRecord> {
        let records = self.records.read().await;
        let start = records.len().saturating_sub(limit);
        records[start..].to_vec()
    }

    /// Attempts of one execution, in attempt order
    pub async fn execution_records(&self, execution_id: &str) -> Vec<UsageRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|r| r.execution_id == execution_id)
            .cloned()
            .collect()
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been recorded
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Drop all records
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}
