//! Completion service trait definition
//!
//! The engine never generates text itself. Anything that can take a prompt
//! plus an ordered candidate list and return one result implements this
//! trait.

use crate::completion::{CompletionRequest, CompletionResult};
use crate::error::Result;

/// External service that performs the actual completion
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Get the service name
    fn name(&self) -> &str;

    /// Name of the service's own credential if it is not configured
    ///
    /// Checked before any call is made.
    fn missing_credential(&self) -> Option<&str> {
        None
    }

    /// Complete the prompt using one of the request's candidates
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult>;
}
