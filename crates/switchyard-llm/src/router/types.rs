//! Core types for prompt routing
//!
//! This module contains the PromptCategory and Priority enums that key
//! every routing decision.

use crate::completion::TokenBudget;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Prompt Category
// ============================================================================

/// Category a prompt is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    /// Condensing a longer text
    Summarization,
    /// Writing, fixing or explaining code
    CodeGeneration,
    /// Short factual question
    QaSimple,
    /// Question that needs a long, reasoned answer
    QaComplex,
    /// Stories, poems and other creative text
    CreativeWriting,
    /// Comparison, evaluation and critique
    Analysis,
    /// Translation between languages
    Translation,
    /// Arithmetic, math and logic problems
    MathLogic,
    /// Anything else
    GeneralChat,
}

impl PromptCategory {
    /// Every category
    pub const ALL: [PromptCategory; 9] = [
        Self::Summarization,
        Self::CodeGeneration,
        Self::QaSimple,
        Self::QaComplex,
        Self::CreativeWriting,
        Self::Analysis,
        Self::Translation,
        Self::MathLogic,
        Self::GeneralChat,
    ];

    /// Snake-case identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarization => "summarization",
            Self::CodeGeneration => "code_generation",
            Self::QaSimple => "qa_simple",
            Self::QaComplex => "qa_complex",
            Self::CreativeWriting => "creative_writing",
            Self::Analysis => "analysis",
            Self::Translation => "translation",
            Self::MathLogic => "math_logic",
            Self::GeneralChat => "general_chat",
        }
    }

    /// Get the default token budget for this category
    ///
    /// Budgets follow typical response lengths:
    /// - QaSimple: short factual answers (300 tokens)
    /// - Summarization: condensed text (800 tokens)
    /// - Translation: similar length to input (1000 tokens)
    /// - GeneralChat: general chat responses (1000 tokens)
    /// - MathLogic: worked solutions (1500 tokens)
    /// - Analysis / QaComplex: reasoned answers (2000 tokens)
    /// - CreativeWriting: long-form text (2000 tokens)
    /// - CodeGeneration: full implementations (4096 tokens)
    #[must_use]
    pub fn default_token_budget(&self) -> TokenBudget {
        match self {
            Self::QaSimple => TokenBudget::new(300, 0.3),
            Self::Summarization => TokenBudget::new(800, 0.3),
            Self::Translation => TokenBudget::new(1000, 0.2),
            Self::GeneralChat => TokenBudget::new(1000, 0.7),
            Self::MathLogic => TokenBudget::new(1500, 0.0),
            Self::Analysis => TokenBudget::new(2000, 0.4),
            Self::QaComplex => TokenBudget::new(2000, 0.5),
            Self::CreativeWriting => TokenBudget::new(2000, 0.9),
            Self::CodeGeneration => TokenBudget::new(4096, 0.2),
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown prompt category: {s}"))
    }
}

// ============================================================================
// Priority
// ============================================================================

/// What the caller wants the router to optimize for
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Cheapest acceptable model
    #[default]
    Cost,
    /// Fastest model
    Latency,
    /// Strongest model
    Quality,
}

impl Priority {
    /// Every priority, in the order used for top-up scans
    pub const ALL: [Priority; 3] = [Self::Cost, Self::Latency, Self::Quality];

    /// Snake-case identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Latency => "latency",
            Self::Quality => "quality",
        }
    }

    /// The two other priorities, in fixed order
    #[must_use]
    pub fn others(&self) -> [Priority; 2] {
        match self {
            Self::Cost => [Self::Latency, Self::Quality],
            Self::Latency => [Self::Cost, Self::Quality],
            Self::Quality => [Self::Cost, Self::Latency],
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cost" | "cheap" => Ok(Self::Cost),
            "latency" | "speed" | "fast" => Ok(Self::Latency),
            "quality" | "best" => Ok(Self::Quality),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}
