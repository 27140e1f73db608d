// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests: recommendations never escape their rule range, for any
//! context and any historical pattern mix.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use tunesmith_core::{
    ComplexityHint, HistoricalPattern, OptimizationContext, TimePressure, UseCase,
};
use tunesmith_rules::{rule_for, ParameterRuleEngine};

const ALL_CASES: [UseCase; 9] = [
    UseCase::CreativeWriting,
    UseCase::CodeGeneration,
    UseCase::Analysis,
    UseCase::Summarization,
    UseCase::Conversation,
    UseCase::Reasoning,
    UseCase::Debugging,
    UseCase::Translation,
    UseCase::Other,
];

fn use_case_strategy() -> impl Strategy<Value = UseCase> {
    (0..ALL_CASES.len()).prop_map(|i| ALL_CASES[i])
}

fn complexity_strategy() -> impl Strategy<Value = Option<ComplexityHint>> {
    prop_oneof![
        Just(None),
        Just(Some(ComplexityHint::Simple)),
        Just(Some(ComplexityHint::Complex)),
    ]
}

fn pressure_strategy() -> impl Strategy<Value = Option<TimePressure>> {
    prop_oneof![
        Just(None),
        Just(Some(TimePressure::Low)),
        Just(Some(TimePressure::Medium)),
        Just(Some(TimePressure::High)),
    ]
}

fn pattern_strategy(use_case: UseCase) -> impl Strategy<Value = HistoricalPattern> {
    (
        0.0f64..2.0,
        0.0f64..1.0,
        1u32..60_000,
        0.0f64..1.0,
        1u32..50,
        0i64..365,
    )
        .prop_map(
            move |(temperature, nucleus_p, max_tokens, success_score, usage_count, days)| {
                HistoricalPattern {
                    use_case,
                    model_id: "model-under-test".to_string(),
                    temperature,
                    nucleus_p,
                    max_tokens,
                    success_score,
                    usage_count,
                    last_used: Utc::now() - Duration::days(days),
                    avg_latency_ms: 0.0,
                    avg_cost: 0.0,
                }
            },
        )
}

proptest! {
    #[test]
    fn recommendation_stays_within_rule_bounds(
        use_case in use_case_strategy(),
        input_length in 0usize..20_000,
        history_length in 0usize..200,
        complexity_hint in complexity_strategy(),
        time_pressure in pressure_strategy(),
    ) {
        let engine = ParameterRuleEngine::new();
        let context = OptimizationContext {
            model_id: "model-under-test".to_string(),
            use_case,
            input_length,
            history_length,
            complexity_hint,
            time_pressure,
        };
        let rec = engine.recommend(use_case, &context, &[]);
        let rule = rule_for(use_case);

        prop_assert!(rec.temperature >= rule.temperature.min);
        prop_assert!(rec.temperature <= rule.temperature.max);
        prop_assert!(rec.nucleus_p >= rule.nucleus_p.min);
        prop_assert!(rec.nucleus_p <= rule.nucleus_p.max);
        prop_assert!(rec.max_tokens >= rule.max_tokens.min);
        prop_assert!(rec.max_tokens <= rule.max_tokens.max);
        prop_assert!(!rec.reasoning.is_empty());
    }

    #[test]
    fn blended_recommendation_stays_within_rule_bounds(
        use_case in use_case_strategy(),
        input_length in 0usize..20_000,
        history_length in 0usize..200,
        complexity_hint in complexity_strategy(),
        time_pressure in pressure_strategy(),
        patterns in prop::collection::vec(use_case_strategy().prop_flat_map(pattern_strategy), 0..8),
    ) {
        let engine = ParameterRuleEngine::new();
        let context = OptimizationContext {
            model_id: "model-under-test".to_string(),
            use_case,
            input_length,
            history_length,
            complexity_hint,
            time_pressure,
        };
        let rec = engine.recommend(use_case, &context, &patterns);
        let rule = rule_for(use_case);

        prop_assert!(rec.temperature >= rule.temperature.min);
        prop_assert!(rec.temperature <= rule.temperature.max);
        prop_assert!(rec.nucleus_p >= rule.nucleus_p.min);
        prop_assert!(rec.nucleus_p <= rule.nucleus_p.max);
        prop_assert!(rec.max_tokens >= rule.max_tokens.min);
        prop_assert!(rec.max_tokens <= rule.max_tokens.max);
    }
}
