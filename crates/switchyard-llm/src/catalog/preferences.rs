//! Ranked model preference lists
//!
//! Every (category, priority) pair maps to an ordered list of catalog ids.
//! Cost lists are ordered by ascending estimated cost, latency lists favor
//! high latency scores, quality lists favor the strongest models for the
//! category.

use crate::router::{Priority, PromptCategory};
use std::collections::HashMap;

const GPT5_NANO: &str = "openai/gpt-5-nano";
const GPT5_MINI: &str = "openai/gpt-5-mini";
const GPT5: &str = "openai/gpt-5";
const HAIKU: &str = "anthropic/claude-haiku-4.5";
const SONNET: &str = "anthropic/claude-sonnet-4.5";
const OPUS: &str = "anthropic/claude-opus-4.5";
const FLASH_LITE: &str = "google/gemini-2.5-flash-lite";
const FLASH: &str = "google/gemini-2.5-flash";
const GEMINI_PRO: &str = "google/gemini-2.5-pro";
const DEEPSEEK_CHAT: &str = "deepseek/deepseek-chat";
const DEEPSEEK_REASONER: &str = "deepseek/deepseek-reasoner";
const LLAMA_8B: &str = "groq/llama-3.1-8b-instant";
const LLAMA_70B: &str = "groq/llama-3.3-70b-versatile";
const MISTRAL_SMALL: &str = "mistral/mistral-small-latest";
const CODESTRAL: &str = "mistral/codestral-latest";
const MISTRAL_LARGE: &str = "mistral/mistral-large-latest";

fn ranked(category: PromptCategory, priority: Priority) -> &'static [&'static str] {
    use Priority::{Cost, Latency, Quality};
    use PromptCategory::*;

    match (category, priority) {
        (Summarization, Cost) => &[LLAMA_8B, GPT5_NANO, FLASH_LITE, FLASH],
        (Summarization, Latency) => &[FLASH_LITE, LLAMA_70B, FLASH, HAIKU],
        (Summarization, Quality) => &[SONNET, GEMINI_PRO, GPT5, HAIKU],

        (CodeGeneration, Cost) => &[DEEPSEEK_CHAT, CODESTRAL, GPT5_MINI, DEEPSEEK_REASONER],
        (CodeGeneration, Latency) => &[CODESTRAL, FLASH, HAIKU, GPT5_MINI],
        (CodeGeneration, Quality) => &[SONNET, OPUS, GPT5, GEMINI_PRO],

        (QaSimple, Cost) => &[LLAMA_8B, GPT5_NANO, MISTRAL_SMALL, FLASH_LITE],
        (QaSimple, Latency) => &[LLAMA_8B, FLASH_LITE, FLASH, GPT5_NANO],
        (QaSimple, Quality) => &[GPT5_MINI, HAIKU, FLASH, DEEPSEEK_CHAT],

        (QaComplex, Cost) => &[DEEPSEEK_CHAT, FLASH, DEEPSEEK_REASONER, HAIKU],
        (QaComplex, Latency) => &[FLASH, HAIKU, GPT5_MINI, SONNET],
        (QaComplex, Quality) => &[OPUS, GPT5, GEMINI_PRO, SONNET],

        (CreativeWriting, Cost) => &[MISTRAL_SMALL, DEEPSEEK_CHAT, FLASH, LLAMA_70B],
        (CreativeWriting, Latency) => &[LLAMA_70B, FLASH, HAIKU, MISTRAL_SMALL],
        (CreativeWriting, Quality) => &[OPUS, SONNET, GPT5, MISTRAL_LARGE],

        (Analysis, Cost) => &[DEEPSEEK_CHAT, FLASH, DEEPSEEK_REASONER, GPT5],
        (Analysis, Latency) => &[FLASH, GPT5_MINI, HAIKU, SONNET],
        (Analysis, Quality) => &[GEMINI_PRO, OPUS, GPT5, SONNET],

        (Translation, Cost) => &[GPT5_NANO, MISTRAL_SMALL, FLASH_LITE, DEEPSEEK_CHAT],
        (Translation, Latency) => &[FLASH_LITE, LLAMA_70B, FLASH, MISTRAL_SMALL],
        (Translation, Quality) => &[GPT5, GEMINI_PRO, SONNET, MISTRAL_LARGE],

        (MathLogic, Cost) => &[DEEPSEEK_CHAT, GPT5_MINI, DEEPSEEK_REASONER, GPT5],
        (MathLogic, Latency) => &[FLASH, GPT5_MINI, LLAMA_70B, HAIKU],
        (MathLogic, Quality) => &[GPT5, DEEPSEEK_REASONER, OPUS, GEMINI_PRO],

        (GeneralChat, Cost) => &[LLAMA_8B, GPT5_NANO, MISTRAL_SMALL, DEEPSEEK_CHAT],
        (GeneralChat, Latency) => &[LLAMA_8B, FLASH_LITE, LLAMA_70B, HAIKU],
        (GeneralChat, Quality) => &[SONNET, GPT5, HAIKU, GEMINI_PRO],
    }
}

/// Default preference lists for every category and priority
#[must_use]
pub fn default_preferences() -> HashMap<(PromptCategory, Priority), Vec<String>> {
    let mut preferences = HashMap::new();
    for category in PromptCategory::ALL {
        for priority in Priority::ALL {
            let ids = ranked(category, priority)
                .iter()
                .map(|id| (*id).to_string())
                .collect();
            preferences.insert((category, priority), ids);
        }
    }
    preferences
}
