// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter recommendation engine.
//!
//! Derives a bounded [`ParameterRecommendation`] from the static rule table,
//! a fixed sequence of context adjustments, and optional historical-pattern
//! blending. Every step clamps back into the category's declared range.

use chrono::Utc;
use tracing::debug;
use tunesmith_core::{
    ComplexityHint, HistoricalPattern, OptimizationContext, ParameterRecommendation, TimePressure,
    UseCase,
};

use crate::tables::{rule_for, ParamRange, TokenRange, UseCaseRule};

/// Weight of the historical weighted average when blending.
///
/// Fixed regardless of how many patterns qualify or their total weight; a
/// deliberate choice preserved for validation against real outcome data.
pub const HISTORICAL_BLEND_WEIGHT: f64 = 0.7;

/// Weight of the rule-engine value when blending.
const RULE_BLEND_WEIGHT: f64 = 0.3;

/// Patterns must exceed this success score to participate in blending.
const BLEND_SUCCESS_FLOOR: f64 = 0.7;

/// Recency decay window: a pattern last used this many days ago has fully
/// decayed to the minimum recency weight.
const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// Recency weight never decays below this floor.
const MIN_RECENCY_WEIGHT: f64 = 0.1;

/// Usage count at which a pattern's success weight saturates.
const USAGE_SATURATION: f64 = 10.0;

/// Clamp a float parameter into its rule range.
fn clamp_param(value: f64, range: &ParamRange) -> f64 {
    value.clamp(range.min, range.max)
}

/// Clamp a token budget into its rule range. Signed input so adjustment
/// arithmetic cannot underflow before clamping.
fn clamp_tokens(value: i64, range: &TokenRange) -> u32 {
    value.clamp(range.min as i64, range.max as i64) as u32
}

/// Stateless rule engine mapping (use_case, context, patterns) to a
/// parameter recommendation.
///
/// Pure computation over the static tables; safe to share freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParameterRuleEngine;

impl ParameterRuleEngine {
    /// Create a new rule engine.
    pub fn new() -> Self {
        Self
    }

    /// Recommend parameters for a use-case in a given context.
    ///
    /// `patterns` are historical outcomes to blend in; pass an empty slice
    /// to get pure rule-derived values. Out-of-range context values simply
    /// trigger no adjustment branch; this function never fails.
    pub fn recommend(
        &self,
        use_case: UseCase,
        context: &OptimizationContext,
        patterns: &[HistoricalPattern],
    ) -> ParameterRecommendation {
        let rule = rule_for(use_case);

        let mut temperature = rule.temperature.default;
        let mut nucleus_p = rule.nucleus_p.default;
        let mut max_tokens = rule.max_tokens.default as i64;
        let mut clauses: Vec<String> = vec![rule.rationale.to_string()];

        // Context adjustments, in fixed order, clamped after every step.
        if context.input_length > 500 {
            temperature = clamp_param(temperature + 0.1, &rule.temperature);
            max_tokens = clamp_tokens(max_tokens + 500, &rule.max_tokens) as i64;
            clauses.push("Long input raises temperature and token budget".to_string());
        } else if context.input_length < 50 {
            temperature = clamp_param(temperature - 0.1, &rule.temperature);
            max_tokens = clamp_tokens(max_tokens - 200, &rule.max_tokens) as i64;
            clauses.push("Short input trims temperature and token budget".to_string());
        }

        if context.history_length > 10 {
            nucleus_p = clamp_param(nucleus_p + 0.05, &rule.nucleus_p);
            max_tokens = clamp_tokens(max_tokens + 300, &rule.max_tokens) as i64;
            clauses.push("Deep conversation history widens sampling and budget".to_string());
        }

        match context.time_pressure {
            Some(TimePressure::High) => {
                temperature = clamp_param(temperature - 0.2, &rule.temperature);
                max_tokens = clamp_tokens(max_tokens - 500, &rule.max_tokens) as i64;
                clauses.push("High time pressure cuts temperature and token budget".to_string());
            }
            Some(TimePressure::Low) => {
                temperature = clamp_param(temperature + 0.1, &rule.temperature);
                max_tokens = clamp_tokens(max_tokens + 500, &rule.max_tokens) as i64;
                clauses.push("Low time pressure allows a warmer, longer response".to_string());
            }
            Some(TimePressure::Medium) | None => {}
        }

        match context.complexity_hint {
            Some(ComplexityHint::Complex) => {
                temperature = clamp_param(temperature + 0.1, &rule.temperature);
                max_tokens = clamp_tokens(max_tokens + 1000, &rule.max_tokens) as i64;
                clauses.push("Complex task widens temperature and token budget".to_string());
            }
            Some(ComplexityHint::Simple) => {
                temperature = clamp_param(temperature - 0.1, &rule.temperature);
                max_tokens = clamp_tokens(max_tokens - 500, &rule.max_tokens) as i64;
                clauses.push("Simple task tightens temperature and token budget".to_string());
            }
            None => {}
        }

        // Historical blending over qualifying patterns.
        if let Some(blended) = weighted_historical_average(use_case, context, patterns) {
            temperature = clamp_param(
                blended.temperature * HISTORICAL_BLEND_WEIGHT + temperature * RULE_BLEND_WEIGHT,
                &rule.temperature,
            );
            nucleus_p = clamp_param(
                blended.nucleus_p * HISTORICAL_BLEND_WEIGHT + nucleus_p * RULE_BLEND_WEIGHT,
                &rule.nucleus_p,
            );
            let blended_tokens = (blended.max_tokens * HISTORICAL_BLEND_WEIGHT
                + max_tokens as f64 * RULE_BLEND_WEIGHT)
                .round() as i64;
            max_tokens = clamp_tokens(blended_tokens, &rule.max_tokens) as i64;
            clauses.push(format!(
                "Blended with {} historically successful pattern{}",
                blended.pattern_count,
                if blended.pattern_count == 1 { "" } else { "s" }
            ));
            debug!(
                use_case = %use_case,
                model_id = %context.model_id,
                patterns = blended.pattern_count,
                "applied historical blending"
            );
        }

        ParameterRecommendation {
            temperature,
            nucleus_p,
            max_tokens: clamp_tokens(max_tokens, &rule.max_tokens),
            reasoning: clauses.join(". "),
        }
    }

    /// The rule row backing a use-case, exposed for bounds checks.
    pub fn rule(&self, use_case: UseCase) -> &'static UseCaseRule {
        rule_for(use_case)
    }
}

/// Weighted averages over qualifying historical patterns.
struct BlendedAverages {
    temperature: f64,
    nucleus_p: f64,
    max_tokens: f64,
    pattern_count: usize,
}

/// Compute recency/success-weighted averages over the qualifying patterns.
///
/// Qualifying = same use_case and model_id with success_score above the
/// floor. Returns `None` when no pattern qualifies or total weight is zero,
/// in which case the rule-derived values stand unblended.
fn weighted_historical_average(
    use_case: UseCase,
    context: &OptimizationContext,
    patterns: &[HistoricalPattern],
) -> Option<BlendedAverages> {
    let now = Utc::now();
    let mut total_weight = 0.0;
    let mut temperature = 0.0;
    let mut nucleus_p = 0.0;
    let mut max_tokens = 0.0;
    let mut pattern_count = 0usize;

    for pattern in patterns {
        if pattern.use_case != use_case
            || pattern.model_id != context.model_id
            || pattern.success_score <= BLEND_SUCCESS_FLOOR
        {
            continue;
        }

        let days_since = (now - pattern.last_used).num_seconds().max(0) as f64 / 86_400.0;
        let recency_weight = (1.0 - days_since / RECENCY_WINDOW_DAYS).max(MIN_RECENCY_WEIGHT);
        let success_weight =
            pattern.success_score * (pattern.usage_count as f64 / USAGE_SATURATION).min(1.0);
        let weight = recency_weight * success_weight;

        total_weight += weight;
        temperature += pattern.temperature * weight;
        nucleus_p += pattern.nucleus_p * weight;
        max_tokens += pattern.max_tokens as f64 * weight;
        pattern_count += 1;
    }

    if total_weight > 0.0 {
        Some(BlendedAverages {
            temperature: temperature / total_weight,
            nucleus_p: nucleus_p / total_weight,
            max_tokens: max_tokens / total_weight,
            pattern_count,
        })
    } else {
        None
    }
}
