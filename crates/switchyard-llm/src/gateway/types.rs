//! Chat-completions wire types (OpenAI compatible with gateway extensions)

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct GatewayRequest {
    pub(crate) model: String,
    /// Ordered fallback list; the gateway tries each in turn
    pub(crate) models: Vec<String>,
    pub(crate) messages: Vec<GatewayMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GatewayMessage {
    pub(crate) role: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayResponse {
    #[serde(default)]
    pub(crate) model: Option<String>,
    pub(crate) choices: Vec<GatewayChoice>,
    pub(crate) usage: Option<GatewayUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayChoice {
    pub(crate) message: GatewayMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayUsage {
    pub(crate) prompt_tokens: u32,
    pub(crate) completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayError {
    pub(crate) error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayErrorDetail {
    pub(crate) message: String,
}
