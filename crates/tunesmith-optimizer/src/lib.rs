// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optimization coordinator for Tunesmith.
//!
//! Ties the classifier, rule engine, and pattern store together behind a
//! single service with TTL-bounded response caches. This is the crate a
//! host application embeds; the lower layers stay usable on their own.

mod cache;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};
use tunesmith_classifier::UseCaseClassifier;
use tunesmith_config::OptimizerConfig;
use tunesmith_core::{OptimizationContext, TunesmithError, UseCase};
use tunesmith_history::PatternStore;
use tunesmith_rules::ParameterRuleEngine;

use crate::cache::{cache_key, TtlCache};
pub use crate::types::{
    FeedbackReport, OptimizationRequest, OptimizationResponse, SmartDefaultsRequest,
    SmartDefaultsResponse,
};

/// How many historical patterns a single recommendation consults.
const RELEVANT_PATTERN_LIMIT: usize = 10;

/// Overall confidence cap when historical evidence backs a recommendation.
const BACKED_CONFIDENCE_CAP: f64 = 0.9;

/// Overall confidence cap for a purely rule-derived recommendation.
const UNBACKED_CONFIDENCE_CAP: f64 = 0.7;

/// Confidence of smart defaults derived without any task hint.
const NO_HINT_CONFIDENCE: f64 = 0.5;

/// Confidence cap for smart defaults derived from a task hint.
const HINTED_CONFIDENCE_CAP: f64 = 0.8;

/// The optimization coordinator.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and internal
/// mutability is confined to the caches and the pattern store.
pub struct Optimizer {
    classifier: UseCaseClassifier,
    engine: ParameterRuleEngine,
    store: Arc<PatternStore>,
    optimize_cache: TtlCache<OptimizationResponse>,
    defaults_cache: TtlCache<SmartDefaultsResponse>,
}

impl Optimizer {
    /// Build a coordinator over the given pattern store.
    pub fn new(store: Arc<PatternStore>, config: &OptimizerConfig) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Self {
            classifier: UseCaseClassifier::new(),
            engine: ParameterRuleEngine::new(),
            store,
            optimize_cache: TtlCache::new(ttl, config.cache_max_entries),
            defaults_cache: TtlCache::new(ttl, config.cache_max_entries),
        }
    }

    /// Produce a tuned parameter set for a described task.
    ///
    /// Classifies the description, consults historical patterns for the
    /// resolved use-case and model, and runs the rule engine. Identical
    /// requests within the cache TTL are served from cache with
    /// `from_cache` set.
    pub fn optimize(&self, request: &OptimizationRequest) -> OptimizationResponse {
        let started = Instant::now();
        let key = cache_key(request);

        if let Some(mut hit) = self.optimize_cache.get(&key) {
            hit.from_cache = true;
            hit.processing_time_ms = elapsed_ms(started);
            debug!(use_case = %hit.use_case, "served optimization from cache");
            return hit;
        }

        let classification = self.classifier.classify(&request.task_description);
        // An explicit caller category overrides the classifier; `Other`
        // in the context means "unknown", not a real override.
        let use_case = if request.context.use_case != UseCase::Other {
            request.context.use_case
        } else {
            classification.primary
        };

        let patterns = if request.include_historical {
            self.store
                .get_relevant(use_case, &request.context.model_id, RELEVANT_PATTERN_LIMIT)
        } else {
            Vec::new()
        };
        let recommendation = self.engine.recommend(use_case, &request.context, &patterns);
        let historical_insights = summarize_patterns(&patterns);

        let cap = if historical_insights.is_empty() {
            UNBACKED_CONFIDENCE_CAP
        } else {
            BACKED_CONFIDENCE_CAP
        };
        let confidence = classification.confidence.min(cap);

        let response = OptimizationResponse {
            use_case,
            classification,
            confidence,
            recommendation,
            historical_insights,
            processing_time_ms: elapsed_ms(started),
            from_cache: false,
        };

        info!(
            use_case = %response.use_case,
            model_id = %request.context.model_id,
            confidence = response.confidence,
            temperature = response.recommendation.temperature,
            "optimized parameters"
        );
        self.optimize_cache.insert(key, response.clone());
        response
    }

    /// Produce sensible starting parameters for a model without a full
    /// task description.
    ///
    /// With no hint the defaults come from the `Other` rule row at fixed
    /// 0.5 confidence; a hint is classified like a (weaker) description.
    pub fn smart_defaults(&self, request: &SmartDefaultsRequest) -> SmartDefaultsResponse {
        let started = Instant::now();
        let key = cache_key(request);

        if let Some(mut hit) = self.defaults_cache.get(&key) {
            hit.from_cache = true;
            hit.processing_time_ms = elapsed_ms(started);
            return hit;
        }

        let (use_case, confidence) = match &request.task_hint {
            Some(hint) => {
                let classification = self.classifier.classify(hint);
                (
                    classification.primary,
                    classification.confidence.min(HINTED_CONFIDENCE_CAP),
                )
            }
            None => (UseCase::Other, NO_HINT_CONFIDENCE),
        };

        let context = OptimizationContext::for_model(&request.model_id);
        let patterns =
            self.store
                .get_relevant(use_case, &request.model_id, RELEVANT_PATTERN_LIMIT);
        let recommendation = self.engine.recommend(use_case, &context, &patterns);

        let response = SmartDefaultsResponse {
            use_case,
            confidence,
            recommendation,
            processing_time_ms: elapsed_ms(started),
            from_cache: false,
        };
        self.defaults_cache.insert(key, response.clone());
        response
    }

    /// Record how a recommended parameter set actually performed.
    ///
    /// Folds into the pattern store's rolling averages; cached responses
    /// age out via TTL rather than being invalidated eagerly.
    pub async fn record_feedback(&self, report: &FeedbackReport) {
        self.store
            .record(
                report.use_case,
                &report.model_id,
                report.temperature,
                report.nucleus_p,
                report.max_tokens,
                report.success_score,
                report.latency_ms,
                report.cost,
            )
            .await;
    }

    /// Drop all cached responses. The next requests recompute against the
    /// current pattern store.
    pub fn clear_caches(&self) {
        self.optimize_cache.clear();
        self.defaults_cache.clear();
    }

    /// Persist the pattern store immediately. For shutdown paths.
    pub async fn flush(&self) -> Result<(), TunesmithError> {
        self.store.flush().await
    }

    /// The underlying pattern store.
    pub fn store(&self) -> &Arc<PatternStore> {
        &self.store
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Aggregate metrics over the consulted patterns. Empty input yields an
/// empty map so responses can distinguish "no history" cheaply.
fn summarize_patterns(
    patterns: &[tunesmith_core::HistoricalPattern],
) -> HashMap<String, f64> {
    if patterns.is_empty() {
        return HashMap::new();
    }

    let n = patterns.len() as f64;
    let mut insights = HashMap::new();
    insights.insert("pattern_count".to_string(), n);
    insights.insert(
        "avg_success_score".to_string(),
        patterns.iter().map(|p| p.success_score).sum::<f64>() / n,
    );
    insights.insert(
        "total_usage".to_string(),
        patterns.iter().map(|p| p.usage_count as f64).sum::<f64>(),
    );

    // Latency averages only over patterns that ever reported latency.
    let with_latency: Vec<f64> = patterns
        .iter()
        .map(|p| p.avg_latency_ms)
        .filter(|&l| l > 0.0)
        .collect();
    if !with_latency.is_empty() {
        insights.insert(
            "avg_latency_ms".to_string(),
            with_latency.iter().sum::<f64>() / with_latency.len() as f64,
        );
    }
    let with_cost: Vec<f64> = patterns
        .iter()
        .map(|p| p.avg_cost)
        .filter(|&c| c > 0.0)
        .collect();
    if !with_cost.is_empty() {
        insights.insert(
            "avg_cost".to_string(),
            with_cost.iter().sum::<f64>() / with_cost.len() as f64,
        );
    }
    insights
}
