//! Completion request and result types
//!
//! These are the values exchanged with the external completion service.

use serde::{Deserialize, Serialize};

/// Token usage reported by the completion service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt (input) tokens
    pub input_tokens: u32,
    /// Completion (output) tokens
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Create a usage record
    #[must_use]
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Input plus output tokens
    #[must_use]
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Output limits applied to a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenBudget {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl TokenBudget {
    /// Create a budget
    #[must_use]
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

/// Request handed to the completion service
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Raw user prompt
    pub prompt: String,
    /// Candidate model ids (`provider/model`), most preferred first
    pub candidates: Vec<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request for the given candidates
    #[must_use]
    pub fn new(prompt: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            candidates,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Apply a token budget
    #[must_use]
    pub fn with_budget(mut self, budget: TokenBudget) -> Self {
        self.max_tokens = Some(budget.max_tokens);
        self.temperature = Some(budget.temperature);
        self
    }
}

/// Result of one successful completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Generated content
    pub content: String,
    /// Model id actually used
    pub model: String,
    /// Token usage, if reported
    pub usage: Option<TokenUsage>,
}

impl CompletionResult {
    /// Create a result without usage information
    #[must_use]
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
        }
    }

    /// Attach token usage
    #[must_use]
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}
