//! Gateway completion service

use super::types::{GatewayError, GatewayMessage, GatewayRequest, GatewayResponse};
use super::{GatewayConfig, API_KEY_ENV};
use crate::completion::{CompletionRequest, CompletionResult, TokenUsage};
use crate::error::{Error, Result};
use crate::router::CompletionService;
use crate::util::truncate_safe;
use reqwest::Client;
use tracing::{debug, instrument};

/// Longest upstream error message kept in an `Error::Api`
const MAX_ERROR_MESSAGE_LEN: usize = 300;

const AUTH_HINT: &str = "check the gateway API key";

/// Completion service backed by an OpenAI-compatible gateway
#[derive(Debug)]
pub struct GatewayService {
    client: Client,
    config: GatewayConfig,
}

impl GatewayService {
    /// Create a new gateway service
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env())
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub(crate) fn build_request(request: &CompletionRequest) -> Result<GatewayRequest> {
        let model = request
            .candidates
            .first()
            .cloned()
            .ok_or_else(|| Error::InvalidInput("no candidate models".to_string()))?;

        Ok(GatewayRequest {
            model,
            models: request.candidates.clone(),
            messages: vec![GatewayMessage {
                role: "user".to_string(),
                content: Some(request.prompt.clone()),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        })
    }

    pub(crate) fn parse_response(text: &str, fallback_model: &str) -> Result<CompletionResult> {
        let response: GatewayResponse =
            serde_json::from_str(text).map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        let model = response
            .model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback_model.to_string());

        let mut result = CompletionResult::new(choice.message.content.unwrap_or_default(), model);
        if let Some(usage) = response.usage {
            result = result.with_usage(TokenUsage::new(usage.prompt_tokens, usage.completion_tokens));
        }
        Ok(result)
    }

    /// Format a non-2xx response as `"<status>: <message>"`
    ///
    /// Status codes and upstream wording are kept so that billing and
    /// rate-limit signatures survive. Authentication failures get a hint
    /// appended after the upstream text.
    pub(crate) fn api_error(status: u16, body: &str) -> Error {
        let message = serde_json::from_str::<GatewayError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        let message = truncate_safe(&message, MAX_ERROR_MESSAGE_LEN);

        if status == 401 || status == 403 {
            Error::Api(format!("{status}: {message} ({AUTH_HINT})"))
        } else {
            Error::Api(format!("{status}: {message}"))
        }
    }
}

#[async_trait::async_trait]
impl CompletionService for GatewayService {
    fn name(&self) -> &str {
        "gateway"
    }

    fn missing_credential(&self) -> Option<&str> {
        if self.config.has_api_key() {
            None
        } else {
            Some(API_KEY_ENV)
        }
    }

    #[instrument(skip(self, request), fields(candidates = request.candidates.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResult> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::NotConfigured(format!("{API_KEY_ENV} not set")))?;

        let body = Self::build_request(&request)?;
        debug!(model = %body.model, "Sending request to gateway");

        let mut http = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .header("Content-Type", "application/json");
        if let Some(app_name) = &self.config.app_name {
            http = http.header("X-Title", app_name);
        }

        let response = http.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.config.timeout.as_millis() as u64)
            } else {
                Error::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &text));
        }

        Self::parse_response(&text, &body.model)
    }
}
