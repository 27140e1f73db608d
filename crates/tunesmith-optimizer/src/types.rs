// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response shapes of the optimization coordinator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tunesmith_classifier::ClassificationResult;
use tunesmith_core::{OptimizationContext, ParameterRecommendation, UseCase};

/// A full optimization request: free-text task description plus context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// What the caller is about to ask the model to do.
    pub task_description: String,
    /// Situational context, including the target model.
    pub context: OptimizationContext,
    /// Whether historical patterns may influence the recommendation.
    #[serde(default = "default_true")]
    pub include_historical: bool,
}

fn default_true() -> bool {
    true
}

impl OptimizationRequest {
    /// Request with historical learning enabled (the default).
    pub fn new(task_description: impl Into<String>, context: OptimizationContext) -> Self {
        Self {
            task_description: task_description.into(),
            context,
            include_historical: true,
        }
    }
}

/// A tuned parameter set with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResponse {
    /// Use-case category the recommendation was derived for. May differ
    /// from the classifier's primary when the caller supplied an explicit
    /// category in the context.
    pub use_case: UseCase,
    /// The full classification of the task description, for auditing.
    pub classification: ClassificationResult,
    /// Overall confidence in the recommendation. Lower than the
    /// classification confidence when no historical evidence backs it.
    pub confidence: f64,
    /// The recommended sampling parameters with their rationale.
    pub recommendation: ParameterRecommendation,
    /// Aggregate metrics over the historical patterns consulted. Empty
    /// when no relevant history exists.
    pub historical_insights: HashMap<String, f64>,
    /// Wall-clock time spent producing this response, in milliseconds.
    pub processing_time_ms: f64,
    /// Whether this response was served from the cache.
    pub from_cache: bool,
}

/// A lightweight defaults request for callers without a task description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartDefaultsRequest {
    /// Target model identifier.
    pub model_id: String,
    /// Optional short hint about the upcoming task (e.g. "coding").
    pub task_hint: Option<String>,
}

impl SmartDefaultsRequest {
    /// Defaults request with no task hint.
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            task_hint: None,
        }
    }

    /// Defaults request with a task hint.
    pub fn with_hint(model_id: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            task_hint: Some(hint.into()),
        }
    }
}

/// Sensible starting parameters for a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartDefaultsResponse {
    /// Use-case the defaults were derived for (`Other` without a hint).
    pub use_case: UseCase,
    /// Confidence in the defaults: 0.5 without a hint, capped at 0.8 with
    /// one, since a short hint is weaker evidence than a full description.
    pub confidence: f64,
    /// The recommended starting parameters.
    pub recommendation: ParameterRecommendation,
    /// Wall-clock time spent producing this response, in milliseconds.
    pub processing_time_ms: f64,
    /// Whether this response was served from the cache.
    pub from_cache: bool,
}

/// Outcome report for a previously recommended parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub use_case: UseCase,
    pub model_id: String,
    pub temperature: f64,
    pub nucleus_p: f64,
    pub max_tokens: u32,
    /// How well the parameters worked, in [0, 1].
    pub success_score: f64,
    /// Observed latency in milliseconds; 0 when unknown.
    #[serde(default)]
    pub latency_ms: f64,
    /// Observed cost in USD; 0 when unknown.
    #[serde(default)]
    pub cost: f64,
}
