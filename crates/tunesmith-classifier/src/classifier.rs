// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic use-case classification.
//!
//! Maps free-text task descriptions to a use-case category using keyword
//! scoring over static pattern tables. No LLM pre-call, no network, no
//! latency; any input degrades gracefully to `UseCase::Other`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tunesmith_core::UseCase;

use crate::patterns::{CATEGORY_PATTERNS, CONTEXT_HINTS};

/// Score contributed per keyword occurrence within a pattern group.
const MATCH_WEIGHT: f64 = 0.3;

/// A group's score is capped at 1.0 regardless of occurrence count.
const GROUP_SCORE_CAP: f64 = 1.0;

/// Minimum aggregate score for a category to claim the primary slot.
const PRIMARY_THRESHOLD: f64 = 0.5;

/// Minimum aggregate score for a category to appear as a secondary.
const SECONDARY_THRESHOLD: f64 = 0.3;

/// Primary confidence is capped strictly below 1.0; the scoring is
/// heuristic and never certain.
const CONFIDENCE_CAP: f64 = 0.95;

/// Confidence reported when nothing in the input matched at all.
const NO_MATCH_CONFIDENCE: f64 = 0.5;

/// At most this many matched keywords are reported per category.
const MAX_KEYWORDS_PER_CATEGORY: usize = 3;

/// Result of classifying a task description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The classified use-case category.
    pub primary: UseCase,
    /// Confidence in the primary classification (0.0-0.95).
    pub confidence: f64,
    /// Up to two runner-up categories that also scored, best first.
    pub secondary: Vec<UseCase>,
    /// Keywords that drove the decision (at most 3 per reported category).
    pub matched_keywords: Vec<String>,
    /// Fixed hint-name to weight associations triggered by the input.
    pub context_hints: HashMap<String, f64>,
}

impl ClassificationResult {
    /// The low-confidence fallback used for empty or unmatchable input.
    fn fallback() -> Self {
        Self {
            primary: UseCase::Other,
            confidence: NO_MATCH_CONFIDENCE,
            secondary: Vec::new(),
            matched_keywords: Vec::new(),
            context_hints: HashMap::new(),
        }
    }
}

/// A single category's aggregate score and matched keywords.
struct CategoryScore {
    category: UseCase,
    score: f64,
    keywords: Vec<String>,
}

/// Deterministic keyword-scoring classifier over the static pattern tables.
///
/// Pure function of the input text: no side effects, no I/O, no interior
/// state, so instances are free to share across tasks without locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct UseCaseClassifier;

impl UseCaseClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify a task description into a use-case category.
    ///
    /// Each pattern group contributes `min(occurrences * 0.3, 1.0)` to its
    /// category; the best-scoring category wins the primary slot when it
    /// reaches 0.5, otherwise the result falls back to `Other` carrying the
    /// best score as its (low) confidence.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ClassificationResult::fallback();
        }

        let lower = trimmed.to_lowercase();
        let mut scored = score_categories(&lower);
        // Stable sort: ties keep table order, so results are deterministic.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        let context_hints = scan_context_hints(&lower);

        let Some(best) = scored.first() else {
            // Nothing matched at all: explicit low-confidence fallback.
            let mut result = ClassificationResult::fallback();
            result.context_hints = context_hints;
            return result;
        };

        let primary_claimed = best.score >= PRIMARY_THRESHOLD;
        let (primary, confidence) = if primary_claimed {
            (best.category, best.score.min(CONFIDENCE_CAP))
        } else {
            // Best candidate is too weak to claim the primary slot; it may
            // still appear among the secondaries below.
            (UseCase::Other, best.score)
        };

        let mut secondary = Vec::new();
        let mut matched_keywords = Vec::new();
        if primary_claimed {
            matched_keywords.extend(best.keywords.iter().cloned());
        }
        for entry in scored.iter().skip(usize::from(primary_claimed)) {
            if entry.score > SECONDARY_THRESHOLD && secondary.len() < 2 {
                secondary.push(entry.category);
                matched_keywords.extend(entry.keywords.iter().cloned());
            }
        }

        debug!(
            primary = %primary,
            confidence,
            candidates = scored.len(),
            "classified task description"
        );

        ClassificationResult {
            primary,
            confidence,
            secondary,
            matched_keywords,
            context_hints,
        }
    }
}

/// Score every category table against the lowercased input.
///
/// Categories with a zero score are omitted entirely.
fn score_categories(lower: &str) -> Vec<CategoryScore> {
    let mut scored = Vec::new();
    for entry in CATEGORY_PATTERNS {
        let mut score = 0.0;
        let mut keywords: Vec<String> = Vec::new();
        for group in entry.groups {
            let mut count = 0usize;
            for keyword in *group {
                let occurrences = lower.matches(keyword).count();
                if occurrences > 0 {
                    count += occurrences;
                    if keywords.len() < MAX_KEYWORDS_PER_CATEGORY {
                        keywords.push((*keyword).to_string());
                    }
                }
            }
            score += (count as f64 * MATCH_WEIGHT).min(GROUP_SCORE_CAP);
        }
        if score > 0.0 {
            scored.push(CategoryScore {
                category: entry.category,
                score,
                keywords,
            });
        }
    }
    scored
}

/// Collect the fixed keyword-to-weight hints present in the input.
fn scan_context_hints(lower: &str) -> HashMap<String, f64> {
    let mut hints = HashMap::new();
    for (name, triggers, weight) in CONTEXT_HINTS {
        if triggers.iter().any(|t| lower.contains(t)) {
            hints.insert((*name).to_string(), *weight);
        }
    }
    hints
}
