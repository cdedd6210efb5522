//! Model descriptors and pricing
//!
//! Prices are USD per 1M tokens. Quality and latency scores are ordinal
//! (1-10, higher is better / faster).

use super::{ASSUMED_INPUT_TOKENS, ASSUMED_OUTPUT_TOKENS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Provider
// ============================================================================

/// Organization hosting one or more models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// OpenAI (GPT-5 family)
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic (Claude 4.5 family)
    Anthropic,
    /// Google (Gemini 2.5 family)
    Google,
    /// DeepSeek
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// Groq (hosted open-weight models)
    Groq,
    /// Mistral AI
    Mistral,
}

impl Provider {
    /// Every provider, in a fixed order
    pub const ALL: [Provider; 6] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Google,
        Provider::DeepSeek,
        Provider::Groq,
        Provider::Mistral,
    ];

    /// Identifier used in model ids and logs
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::DeepSeek => "deepseek",
            Self::Groq => "groq",
            Self::Mistral => "mistral",
        }
    }

    /// Environment variable holding this provider's API key
    #[must_use]
    pub fn credential_env_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GEMINI_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::Mistral => "MISTRAL_API_KEY",
        }
    }

    /// Lower-case names this provider goes by in error messages
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["openai"],
            Self::Anthropic => &["anthropic"],
            Self::Google => &["google", "gemini", "vertex"],
            Self::DeepSeek => &["deepseek"],
            Self::Groq => &["groq"],
            Self::Mistral => &["mistral"],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == lower || p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| format!("unknown provider: {s}"))
    }
}

// ============================================================================
// Model Descriptor
// ============================================================================

/// A (provider, model) pair with pricing and ranking scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Catalog id (`provider/model`)
    pub id: String,
    /// Hosting provider
    pub provider: Provider,
    /// Provider-side model name
    pub model: String,
    /// Quality score (higher is better)
    pub quality: u8,
    /// Latency score (higher is faster)
    pub latency: u8,
    /// Cost per 1M input tokens (USD)
    pub input_cost_per_million: f64,
    /// Cost per 1M output tokens (USD)
    pub output_cost_per_million: f64,
}

impl ModelDescriptor {
    /// Create a descriptor; the id is derived as `provider/model`
    #[must_use]
    pub fn new(
        provider: Provider,
        model: impl Into<String>,
        quality: u8,
        latency: u8,
        input_cost_per_million: f64,
        output_cost_per_million: f64,
    ) -> Self {
        let model = model.into();
        Self {
            id: format!("{}/{}", provider.as_str(), model),
            provider,
            model,
            quality,
            latency,
            input_cost_per_million: input_cost_per_million.max(0.0),
            output_cost_per_million: output_cost_per_million.max(0.0),
        }
    }

    /// Calculate cost for given token counts
    #[must_use]
    pub fn calculate_cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let input_cost = (input_tokens as f64 / 1_000_000.0) * self.input_cost_per_million;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * self.output_cost_per_million;
        input_cost + output_cost
    }

    /// Pre-call cost estimate using the assumed token mix (500 in / 150 out)
    #[must_use]
    pub fn estimated_cost(&self) -> f64 {
        self.calculate_cost(ASSUMED_INPUT_TOKENS, ASSUMED_OUTPUT_TOKENS)
    }
}

// ============================================================================
// 2026 Model Pricing Constants (per 1M tokens, USD)
// ============================================================================

// OpenAI GPT-5 family
const GPT5_NANO_INPUT_COST: f64 = 0.05;
const GPT5_NANO_OUTPUT_COST: f64 = 0.40;
const GPT5_MINI_INPUT_COST: f64 = 0.25;
const GPT5_MINI_OUTPUT_COST: f64 = 2.00;
const GPT5_INPUT_COST: f64 = 1.25;
const GPT5_OUTPUT_COST: f64 = 10.00;

// Anthropic Claude 4.5 family
const CLAUDE_HAIKU45_INPUT_COST: f64 = 1.00;
const CLAUDE_HAIKU45_OUTPUT_COST: f64 = 5.00;
const CLAUDE_SONNET45_INPUT_COST: f64 = 3.00;
const CLAUDE_SONNET45_OUTPUT_COST: f64 = 15.00;
const CLAUDE_OPUS45_INPUT_COST: f64 = 5.00;
const CLAUDE_OPUS45_OUTPUT_COST: f64 = 25.00;

// Google Gemini 2.5 family
const GEMINI_FLASH_LITE_INPUT_COST: f64 = 0.10;
const GEMINI_FLASH_LITE_OUTPUT_COST: f64 = 0.40;
const GEMINI_FLASH_INPUT_COST: f64 = 0.075;
const GEMINI_FLASH_OUTPUT_COST: f64 = 0.60;
const GEMINI_PRO_INPUT_COST: f64 = 1.25;
const GEMINI_PRO_OUTPUT_COST: f64 = 15.00;

// DeepSeek
const DEEPSEEK_CHAT_INPUT_COST: f64 = 0.14;
const DEEPSEEK_CHAT_OUTPUT_COST: f64 = 0.28;
const DEEPSEEK_REASONER_INPUT_COST: f64 = 0.55;
const DEEPSEEK_REASONER_OUTPUT_COST: f64 = 2.19;

// Groq
const GROQ_LLAMA_8B_INPUT_COST: f64 = 0.05;
const GROQ_LLAMA_8B_OUTPUT_COST: f64 = 0.08;
const GROQ_LLAMA_70B_INPUT_COST: f64 = 0.59;
const GROQ_LLAMA_70B_OUTPUT_COST: f64 = 0.79;

// Mistral
const MISTRAL_SMALL_INPUT_COST: f64 = 0.10;
const MISTRAL_SMALL_OUTPUT_COST: f64 = 0.30;
const CODESTRAL_INPUT_COST: f64 = 0.30;
const CODESTRAL_OUTPUT_COST: f64 = 0.90;
const MISTRAL_LARGE_INPUT_COST: f64 = 2.00;
const MISTRAL_LARGE_OUTPUT_COST: f64 = 6.00;

/// Default model table
#[must_use]
pub fn default_models() -> Vec<ModelDescriptor> {
    use Provider::*;

    vec![
        // ====================================================================
        // OpenAI
        // ====================================================================
        ModelDescriptor::new(OpenAi, "gpt-5-nano", 6, 9, GPT5_NANO_INPUT_COST, GPT5_NANO_OUTPUT_COST),
        ModelDescriptor::new(OpenAi, "gpt-5-mini", 8, 7, GPT5_MINI_INPUT_COST, GPT5_MINI_OUTPUT_COST),
        ModelDescriptor::new(OpenAi, "gpt-5", 9, 5, GPT5_INPUT_COST, GPT5_OUTPUT_COST),
        // ====================================================================
        // Anthropic
        // ====================================================================
        ModelDescriptor::new(
            Anthropic,
            "claude-haiku-4.5",
            7,
            8,
            CLAUDE_HAIKU45_INPUT_COST,
            CLAUDE_HAIKU45_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Anthropic,
            "claude-sonnet-4.5",
            9,
            6,
            CLAUDE_SONNET45_INPUT_COST,
            CLAUDE_SONNET45_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Anthropic,
            "claude-opus-4.5",
            10,
            4,
            CLAUDE_OPUS45_INPUT_COST,
            CLAUDE_OPUS45_OUTPUT_COST,
        ),
        // ====================================================================
        // Google
        // ====================================================================
        ModelDescriptor::new(
            Google,
            "gemini-2.5-flash-lite",
            6,
            10,
            GEMINI_FLASH_LITE_INPUT_COST,
            GEMINI_FLASH_LITE_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Google,
            "gemini-2.5-flash",
            7,
            9,
            GEMINI_FLASH_INPUT_COST,
            GEMINI_FLASH_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Google,
            "gemini-2.5-pro",
            9,
            5,
            GEMINI_PRO_INPUT_COST,
            GEMINI_PRO_OUTPUT_COST,
        ),
        // ====================================================================
        // DeepSeek
        // ====================================================================
        ModelDescriptor::new(
            DeepSeek,
            "deepseek-chat",
            7,
            6,
            DEEPSEEK_CHAT_INPUT_COST,
            DEEPSEEK_CHAT_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            DeepSeek,
            "deepseek-reasoner",
            8,
            3,
            DEEPSEEK_REASONER_INPUT_COST,
            DEEPSEEK_REASONER_OUTPUT_COST,
        ),
        // ====================================================================
        // Groq
        // ====================================================================
        ModelDescriptor::new(
            Groq,
            "llama-3.1-8b-instant",
            4,
            10,
            GROQ_LLAMA_8B_INPUT_COST,
            GROQ_LLAMA_8B_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Groq,
            "llama-3.3-70b-versatile",
            6,
            10,
            GROQ_LLAMA_70B_INPUT_COST,
            GROQ_LLAMA_70B_OUTPUT_COST,
        ),
        // ====================================================================
        // Mistral
        // ====================================================================
        ModelDescriptor::new(
            Mistral,
            "mistral-small-latest",
            6,
            8,
            MISTRAL_SMALL_INPUT_COST,
            MISTRAL_SMALL_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Mistral,
            "codestral-latest",
            7,
            8,
            CODESTRAL_INPUT_COST,
            CODESTRAL_OUTPUT_COST,
        ),
        ModelDescriptor::new(
            Mistral,
            "mistral-large-latest",
            8,
            6,
            MISTRAL_LARGE_INPUT_COST,
            MISTRAL_LARGE_OUTPUT_COST,
        ),
    ]
}
