// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static per-use-case parameter rule tables.
//!
//! Each category declares a `{min, max, default}` triple for temperature,
//! nucleus_p, and max_tokens, plus a rationale clause for the reasoning
//! string. Adjustments and historical blending always clamp back into the
//! declared range, so the table is the single source of truth for bounds.

use tunesmith_core::UseCase;

/// Inclusive bounds and default for a float-valued sampling parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// Inclusive bounds and default for the output token budget.
#[derive(Debug, Clone, Copy)]
pub struct TokenRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

/// One category's complete parameter rule row.
#[derive(Debug, Clone, Copy)]
pub struct UseCaseRule {
    pub temperature: ParamRange,
    pub nucleus_p: ParamRange,
    pub max_tokens: TokenRange,
    /// Rationale clause opening every reasoning string for this category.
    pub rationale: &'static str,
}

/// Look up the rule row for a use-case category.
///
/// Every category has a row; `Other` is the moderate middle-ground default
/// and also serves any future category additions until tuned.
pub fn rule_for(use_case: UseCase) -> &'static UseCaseRule {
    match use_case {
        UseCase::CreativeWriting => &UseCaseRule {
            temperature: ParamRange { min: 0.7, max: 1.2, default: 0.9 },
            nucleus_p: ParamRange { min: 0.85, max: 0.99, default: 0.95 },
            max_tokens: TokenRange { min: 1000, max: 4000, default: 2000 },
            rationale: "High temperature encourages creative and diverse outputs",
        },
        UseCase::CodeGeneration => &UseCaseRule {
            temperature: ParamRange { min: 0.0, max: 0.4, default: 0.2 },
            nucleus_p: ParamRange { min: 0.8, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 500, max: 3000, default: 1500 },
            rationale: "Low temperature produces precise, deterministic code",
        },
        UseCase::Analysis => &UseCaseRule {
            temperature: ParamRange { min: 0.1, max: 0.5, default: 0.3 },
            nucleus_p: ParamRange { min: 0.85, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 800, max: 3000, default: 1500 },
            rationale: "Moderate temperature balances insight with factual grounding",
        },
        UseCase::Summarization => &UseCaseRule {
            temperature: ParamRange { min: 0.1, max: 0.5, default: 0.3 },
            nucleus_p: ParamRange { min: 0.8, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 300, max: 1500, default: 800 },
            rationale: "Low temperature keeps summaries faithful to the source",
        },
        UseCase::Conversation => &UseCaseRule {
            temperature: ParamRange { min: 0.5, max: 0.9, default: 0.7 },
            nucleus_p: ParamRange { min: 0.9, max: 0.99, default: 0.95 },
            max_tokens: TokenRange { min: 300, max: 2000, default: 1000 },
            rationale: "Balanced parameters for natural conversational flow",
        },
        UseCase::Reasoning => &UseCaseRule {
            temperature: ParamRange { min: 0.0, max: 0.4, default: 0.2 },
            nucleus_p: ParamRange { min: 0.8, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 1000, max: 4000, default: 2000 },
            rationale: "Low temperature keeps multi-step reasoning on track",
        },
        UseCase::Debugging => &UseCaseRule {
            temperature: ParamRange { min: 0.0, max: 0.3, default: 0.1 },
            nucleus_p: ParamRange { min: 0.8, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 500, max: 2500, default: 1200 },
            rationale: "Very low temperature favors exact, reproducible diagnoses",
        },
        UseCase::Translation => &UseCaseRule {
            temperature: ParamRange { min: 0.0, max: 0.4, default: 0.2 },
            nucleus_p: ParamRange { min: 0.8, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 500, max: 2000, default: 1000 },
            rationale: "Low temperature preserves meaning with minimal drift",
        },
        UseCase::Other => &UseCaseRule {
            temperature: ParamRange { min: 0.3, max: 0.8, default: 0.5 },
            nucleus_p: ParamRange { min: 0.85, max: 0.95, default: 0.9 },
            max_tokens: TokenRange { min: 500, max: 2500, default: 1000 },
            rationale: "Moderate middle-ground defaults for an unclassified task",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_category_has_a_coherent_rule_row() {
        for case in UseCase::iter() {
            let rule = rule_for(case);
            assert!(rule.temperature.min <= rule.temperature.default);
            assert!(rule.temperature.default <= rule.temperature.max);
            assert!(rule.nucleus_p.min <= rule.nucleus_p.default);
            assert!(rule.nucleus_p.default <= rule.nucleus_p.max);
            assert!(rule.max_tokens.min <= rule.max_tokens.default);
            assert!(rule.max_tokens.default <= rule.max_tokens.max);
            assert!(!rule.rationale.is_empty());
        }
    }

    #[test]
    fn bounds_stay_within_global_parameter_domains() {
        for case in UseCase::iter() {
            let rule = rule_for(case);
            assert!(rule.temperature.min >= 0.0 && rule.temperature.max <= 2.0);
            assert!(rule.nucleus_p.min >= 0.0 && rule.nucleus_p.max <= 1.0);
            assert!(rule.max_tokens.min > 0);
        }
    }

    #[test]
    fn creative_writing_runs_hotter_than_code() {
        let creative = rule_for(UseCase::CreativeWriting);
        let code = rule_for(UseCase::CodeGeneration);
        assert!(creative.temperature.default > code.temperature.default);
        assert!(creative.nucleus_p.default > code.nucleus_p.default);
        assert!(creative.max_tokens.default > code.max_tokens.default);
    }

    #[test]
    fn debugging_defaults_are_near_deterministic() {
        let rule = rule_for(UseCase::Debugging);
        assert!(rule.temperature.default <= 0.2);
    }
}
