//! Gateway - OpenAI-compatible multi-provider completion service
//!
//! Sends the prompt together with the ordered candidate list to a single
//! gateway endpoint, which tries the candidates in order on our behalf.
//!
//! # Module Structure
//!
//! - `types`: Wire types for the chat-completions API
//! - `service`: GatewayService implementation

mod service;
mod types;


pub use service::GatewayService;

use crate::util::mask_api_key;
use std::fmt;
use std::time::Duration;

/// Default gateway base URL
pub const BASE_URL: &str = "https://ai-gateway.vercel.sh/v1";

/// Environment variable holding the gateway API key
pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";

/// Environment variable overriding the gateway base URL
pub const BASE_URL_ENV: &str = "AI_GATEWAY_BASE_URL";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default application name sent with each request
pub const DEFAULT_APP_NAME: &str = "Switchyard";

/// Gateway configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// API key; `None` when not configured
    pub api_key: Option<String>,
    /// Base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// App name (sent as `X-Title`)
    pub app_name: Option<String>,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_deref().map(mask_api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            app_name: Some(DEFAULT_APP_NAME.to_string()),
        }
    }
}

impl GatewayConfig {
    /// Create a configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Create from environment variables
    ///
    /// A missing key is not an error here; the service reports it through
    /// `missing_credential` before any call is made.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: present(API_KEY_ENV),
            base_url: present(BASE_URL_ENV).unwrap_or_else(|| BASE_URL.to_string()),
            ..Self::default()
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the app name
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Chat-completions endpoint
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
