// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common value types shared across the Tunesmith workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Closed set of task archetypes used to select baseline sampling parameters.
///
/// `Other` is the universal fallback for text the classifier cannot place
/// with sufficient confidence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    CreativeWriting,
    CodeGeneration,
    Analysis,
    Summarization,
    Conversation,
    Reasoning,
    Debugging,
    Translation,
    Other,
}

/// Caller-supplied hint about task complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityHint {
    Simple,
    Complex,
}

/// Caller-supplied urgency signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TimePressure {
    Low,
    Medium,
    High,
}

/// Situational context for a single optimization request.
///
/// Immutable value object supplied by the caller. Optional fields that are
/// absent simply trigger no adjustment branch in the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationContext {
    /// Target model identifier (e.g. "claude-sonnet-4-20250514").
    pub model_id: String,
    /// Use-case category, typically `Other` when unknown to the caller.
    #[serde(default = "default_use_case")]
    pub use_case: UseCase,
    /// Approximate input size in characters.
    #[serde(default)]
    pub input_length: usize,
    /// Conversation depth (number of prior turns).
    #[serde(default)]
    pub history_length: usize,
    /// Optional complexity hint.
    #[serde(default)]
    pub complexity_hint: Option<ComplexityHint>,
    /// Optional urgency signal.
    #[serde(default)]
    pub time_pressure: Option<TimePressure>,
}

fn default_use_case() -> UseCase {
    UseCase::Other
}

impl OptimizationContext {
    /// Create a minimal context for a model with everything else defaulted.
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            use_case: UseCase::Other,
            input_length: 0,
            history_length: 0,
            complexity_hint: None,
            time_pressure: None,
        }
    }
}

/// A tuned set of sampling parameters with a human-readable rationale.
///
/// Every numeric field lies within the declared rule range of the use-case
/// that produced it, even after context and historical adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecommendation {
    /// Sampling temperature in [0, 2].
    pub temperature: f64,
    /// Nucleus sampling threshold in [0, 1].
    pub nucleus_p: f64,
    /// Maximum output token budget (> 0).
    pub max_tokens: u32,
    /// Non-empty explanation of how the values were derived.
    pub reasoning: String,
}

/// A recorded parameter combination with a rolling success metric.
///
/// Identity is the composite of use-case, model, rounded temperature and
/// nucleus_p, and max_tokens; repeat reports for the same identity fold into
/// running averages rather than creating new entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPattern {
    pub use_case: UseCase,
    pub model_id: String,
    pub temperature: f64,
    pub nucleus_p: f64,
    pub max_tokens: u32,
    /// Rolling success score in [0, 1].
    pub success_score: f64,
    /// Number of reports folded into this pattern (>= 1).
    pub usage_count: u32,
    /// Timestamp of the most recent report.
    pub last_used: DateTime<Utc>,
    /// Rolling average latency in milliseconds (0 when never reported).
    pub avg_latency_ms: f64,
    /// Rolling average cost in USD (0 when never reported).
    pub avg_cost: f64,
}

impl HistoricalPattern {
    /// Composite identity key: temperature and nucleus_p rounded to two
    /// decimals so near-identical reports collapse into one pattern.
    pub fn identity_key(
        use_case: UseCase,
        model_id: &str,
        temperature: f64,
        nucleus_p: f64,
        max_tokens: u32,
    ) -> String {
        format!("{use_case}:{model_id}:{temperature:.2}:{nucleus_p:.2}:{max_tokens}")
    }

    /// The identity key of this pattern.
    pub fn key(&self) -> String {
        Self::identity_key(
            self.use_case,
            &self.model_id,
            self.temperature,
            self.nucleus_p,
            self.max_tokens,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn use_case_display_and_parse_round_trip() {
        for case in UseCase::iter() {
            let s = case.to_string();
            let parsed = UseCase::from_str(&s).expect("should parse back");
            assert_eq!(case, parsed);
        }
        assert_eq!(UseCase::CreativeWriting.to_string(), "creative-writing");
        assert_eq!(UseCase::from_str("debugging").unwrap(), UseCase::Debugging);
    }

    #[test]
    fn use_case_serde_uses_kebab_case() {
        let json = serde_json::to_string(&UseCase::CodeGeneration).unwrap();
        assert_eq!(json, "\"code-generation\"");
        let parsed: UseCase = serde_json::from_str("\"creative-writing\"").unwrap();
        assert_eq!(parsed, UseCase::CreativeWriting);
    }

    #[test]
    fn context_deserializes_with_defaults() {
        let ctx: OptimizationContext =
            serde_json::from_str(r#"{"model_id": "claude-sonnet-4-20250514"}"#).unwrap();
        assert_eq!(ctx.use_case, UseCase::Other);
        assert_eq!(ctx.input_length, 0);
        assert!(ctx.complexity_hint.is_none());
        assert!(ctx.time_pressure.is_none());
    }

    #[test]
    fn identity_key_rounds_to_two_decimals() {
        let a = HistoricalPattern::identity_key(UseCase::Analysis, "m1", 0.701, 0.899, 2048);
        let b = HistoricalPattern::identity_key(UseCase::Analysis, "m1", 0.699, 0.901, 2048);
        assert_eq!(a, "analysis:m1:0.70:0.90:2048");
        assert_eq!(a, b);
    }

    #[test]
    fn identity_key_distinguishes_models() {
        let a = HistoricalPattern::identity_key(UseCase::Analysis, "m1", 0.7, 0.9, 2048);
        let b = HistoricalPattern::identity_key(UseCase::Analysis, "m2", 0.7, 0.9, 2048);
        assert_ne!(a, b);
    }
}
