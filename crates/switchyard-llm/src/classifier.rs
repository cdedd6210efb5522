//! Prompt Classifier - rule-based prompt categorization
//!
//! Rule groups are evaluated in a fixed precedence order and the first
//! group with a matching pattern decides the category:
//!
//! 1. math/logic
//! 2. code
//! 3. summarization
//! 4. translation
//! 5. analysis
//! 6. creative writing
//! 7. complex Q&A (long input or "explain in detail" phrasing)
//! 8. simple Q&A (interrogatives)
//!
//! Anything left over is `general_chat`.

use crate::router::PromptCategory;
use regex::Regex;
use serde::Serialize;

/// Prompts at least this long (in characters) count as complex questions
pub const COMPLEX_QUESTION_MIN_CHARS: usize = 300;

/// Outcome of classifying a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Selected category
    pub category: PromptCategory,
    /// Name of the rule group that matched
    pub rule: &'static str,
}

struct RuleGroup {
    name: &'static str,
    category: PromptCategory,
    patterns: Vec<Regex>,
}

impl RuleGroup {
    fn new(name: &'static str, category: PromptCategory, patterns: &[&str]) -> Self {
        Self {
            name,
            category,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("classifier pattern must compile"))
                .collect(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

lazy_static::lazy_static! {
    static ref RULES: Vec<RuleGroup> = vec![
        RuleGroup::new("math_logic", PromptCategory::MathLogic, &[
            r"\d+(\.\d+)?\s*[+*^%=×÷]\s*\(?\d",
            // Unspaced `-` and `/` are ranges and dates
            r"\d+(\.\d+)?\s+[-/]\s+\(?\d",
            r"\b(calculate|compute|solve|equation|integral|derivative|probability|theorem|prove|proof|arithmetic|algebra|geometry|factorial|logic puzzle|syllogism)\b",
            r"\bmath(s|ematics)?\b",
        ]),
        RuleGroup::new("code", PromptCategory::CodeGeneration, &[
            r"```",
            r"\bdef\s+\w+\s*\(",
            r"\bfn\s+\w+\s*[(<]",
            r"\bfunction\s*\w*\s*\(",
            r"\bclass\s+\w+\s*[:({]",
            r"=>|->\s*\w|console\.log|#include|\bimport\s+[\w.]+|\bpub\s+(fn|struct)\b",
            r"\b(code|coding|bug|debug|compile|compiler|refactor|stack trace|exception|segfault|python|javascript|typescript|rust|golang|java|sql|regex|unit test)\b",
        ]),
        RuleGroup::new("summarization", PromptCategory::Summarization, &[
            r"\bsummar(y|ize|ise|ization|isation)\b",
            r"\btl;?dr\b",
            r"\b(condense|recap|key points|bullet points|main points|gist)\b",
        ]),
        RuleGroup::new("translation", PromptCategory::Translation, &[
            r"\btranslat(e|ion|ed)\b",
            r"\b(in|into|to) (english|french|spanish|german|italian|portuguese|japanese|chinese|korean|russian|arabic|hindi|dutch)\b",
        ]),
        RuleGroup::new("analysis", PromptCategory::Analysis, &[
            r"\banaly(s|z)(e|is|ing)\b",
            r"\b(compare|comparison|contrast|evaluate|evaluation|assess|assessment|critique|pros and cons|trade-?offs?|strengths and weaknesses)\b",
        ]),
        RuleGroup::new("creative_writing", PromptCategory::CreativeWriting, &[
            r"\b(story|stories|poem|poetry|haiku|limerick|sonnet|lyrics|fiction|fairy tale|screenplay|short story)\b",
            r"\b(imagine|creative|once upon a time)\b",
        ]),
        RuleGroup::new("qa_complex", PromptCategory::QaComplex, &[
            r"\bexplain\b.*\b(in detail|in depth|thoroughly|step by step)\b",
            r"\b(in-depth|elaborate on|walk me through|deep dive|comprehensive(ly)?)\b",
        ]),
        RuleGroup::new("qa_simple", PromptCategory::QaSimple, &[
            r"\?\s*$",
            r"^(what|who|whom|when|where|which|why|how|is|are|was|were|can|could|does|do|did|should|would|will)\b",
        ]),
    ];
}

/// Classify a prompt into exactly one category
#[must_use]
pub fn classify(text: &str) -> PromptCategory {
    classify_with_rule(text).category
}

/// Classify a prompt and report which rule group fired
#[must_use]
pub fn classify_with_rule(text: &str) -> Classification {
    let normalized = text.trim().to_lowercase();

    for group in RULES.iter() {
        // The length heuristic belongs to the complex Q&A group and
        // must not outrank the keyword groups before it.
        if group.category == PromptCategory::QaComplex
            && normalized.chars().count() >= COMPLEX_QUESTION_MIN_CHARS
        {
            return Classification {
                category: group.category,
                rule: group.name,
            };
        }
        if group.matches(&normalized) {
            return Classification {
                category: group.category,
                rule: group.name,
            };
        }
    }

    Classification {
        category: PromptCategory::GeneralChat,
        rule: "fallback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarization_scenario() {
        assert_eq!(
            classify("Summarize this article in three bullet points"),
            PromptCategory::Summarization
        );
    }

    #[test]
    fn test_code_scenario() {
        assert_eq!(
            classify("def foo(): pass — fix this bug"),
            PromptCategory::CodeGeneration
        );
    }

    #[test]
    fn test_math_detection() {
        assert_eq!(classify("What is 17 * 23?"), PromptCategory::MathLogic);
        assert_eq!(classify("Solve x^2 = 9"), PromptCategory::MathLogic);
        assert_eq!(
            classify("what is the probability of two heads"),
            PromptCategory::MathLogic
        );
    }

    #[test]
    fn test_ranges_and_dates_are_not_arithmetic() {
        assert_eq!(
            classify("Summarize this article in 3-5 bullet points"),
            PromptCategory::Summarization
        );
        assert_eq!(
            classify("Translate the 2020-2024 report into French"),
            PromptCategory::Translation
        );
        assert_eq!(
            classify("Write a poem about 9/11"),
            PromptCategory::CreativeWriting
        );
        assert_eq!(classify("what is 10 / 4"), PromptCategory::MathLogic);
        assert_eq!(classify("what is 12 - 7"), PromptCategory::MathLogic);
    }

    #[test]
    fn test_math_outranks_everything() {
        // Contains code, summary and question markers too
        let prompt = "Summarize why 2 + 2 = 4 in python?";
        assert_eq!(classify(prompt), PromptCategory::MathLogic);
    }

    #[test]
    fn test_code_outranks_summarization() {
        assert_eq!(
            classify("Summarize what this function does: ```let x = y;```"),
            PromptCategory::CodeGeneration
        );
    }

    #[test]
    fn test_summarization_outranks_translation() {
        assert_eq!(
            classify("Translate and summarize this memo into French"),
            PromptCategory::Summarization
        );
    }

    #[test]
    fn test_translation() {
        assert_eq!(
            classify("Translate 'good morning' to Japanese"),
            PromptCategory::Translation
        );
        assert_eq!(
            classify("How do you say thank you in Spanish?"),
            PromptCategory::Translation
        );
    }

    #[test]
    fn test_analysis_outranks_creative() {
        assert_eq!(
            classify("Compare these two poems and critique their style"),
            PromptCategory::Analysis
        );
    }

    #[test]
    fn test_creative_writing() {
        assert_eq!(
            classify("Write a poem about the sea"),
            PromptCategory::CreativeWriting
        );
    }

    #[test]
    fn test_complex_question() {
        assert_eq!(
            classify("Explain in detail how TCP congestion control works"),
            PromptCategory::QaComplex
        );
        let long = format!("Tell me about the history of {}", "the printing press ".repeat(20));
        assert_eq!(classify(&long), PromptCategory::QaComplex);
    }

    #[test]
    fn test_simple_question() {
        assert_eq!(
            classify("Who wrote Pride and Prejudice?"),
            PromptCategory::QaSimple
        );
        assert_eq!(classify("where is lisbon"), PromptCategory::QaSimple);
    }

    #[test]
    fn test_general_chat_fallback() {
        let c = classify_with_rule("hello there, nice to meet you");
        assert_eq!(c.category, PromptCategory::GeneralChat);
        assert_eq!(c.rule, "fallback");
        assert_eq!(classify(""), PromptCategory::GeneralChat);
    }

    #[test]
    fn test_rule_name_reported() {
        let c = classify_with_rule("tl;dr of this thread please");
        assert_eq!(c.category, PromptCategory::Summarization);
        assert_eq!(c.rule, "summarization");
    }

    #[test]
    fn test_long_keyword_prompt_keeps_keyword_category() {
        let long = format!("Summarize the following: {}", "lorem ipsum ".repeat(40));
        assert_eq!(classify(&long), PromptCategory::Summarization);
    }
}
