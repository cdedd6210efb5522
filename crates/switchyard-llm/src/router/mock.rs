//! Mock completion service for testing
//!
//! Returns queued results in order. When the queue is empty it either
//! answers with the first candidate or repeats a fixed error, depending on
//! how it was built. Every request is recorded.

use super::provider::CompletionService;
use crate::completion::{CompletionRequest, CompletionResult, TokenUsage};
use crate::error::{Error, Result};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A scripted completion service
#[derive(Clone)]
pub struct MockCompletionService {
    responses: Arc<Mutex<VecDeque<Result<CompletionResult>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    fallback_error: Option<String>,
    missing_credential: Option<String>,
}

impl Default for MockCompletionService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionService {
    /// Create a mock that succeeds with the first candidate once its queue is empty
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback_error: None,
            missing_credential: None,
        }
    }

    /// Create a mock that fails every call with the given API error message
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback_error: Some(message.into()),
            ..Self::new()
        }
    }

    /// Report a missing service credential
    #[must_use]
    pub fn with_missing_credential(mut self, variable: impl Into<String>) -> Self {
        self.missing_credential = Some(variable.into());
        self
    }

    /// Queue a successful result
    pub fn push_result(&self, result: CompletionResult) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(result));
    }

    /// Queue an error
    pub fn push_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Number of calls received
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Requests received, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl CompletionService for MockCompletionService {
    fn name(&self) -> &str {
        "mock"
    }

    fn missing_credential(&self) -> Option<&str> {
        self.missing_credential.as_deref()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let queued = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(response) = queued {
            return response;
        }

        if let Some(message) = &self.fallback_error {
            return Err(Error::Api(message.clone()));
        }

        let model = request
            .candidates
            .first()
            .cloned()
            .unwrap_or_else(|| "mock/mock-model".to_string());
        Ok(CompletionResult::new("mock response", model).with_usage(TokenUsage::new(500, 150)))
    }
}
