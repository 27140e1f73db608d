// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory pattern store with periodic durable flushes.
//!
//! All reads and writes go through a single mutex so concurrent feedback
//! for the same identity key can never lose an update. Flushes snapshot
//! the map under the lock and perform file I/O outside it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info, warn};
use tunesmith_config::HistoryConfig;
use tunesmith_core::{HistoricalPattern, TunesmithError, UseCase};

use crate::storage::{JsonFileStorage, PatternStorage};

/// Guarded mutable state of the store.
struct StoreState {
    patterns: HashMap<String, HistoricalPattern>,
    writes_since_flush: u32,
}

/// Per-use-case summary of the store contents.
#[derive(Debug, Clone)]
pub struct StoreSummary {
    /// Total number of distinct patterns.
    pub pattern_count: usize,
    /// Pattern counts per use-case category.
    pub per_use_case: HashMap<UseCase, usize>,
}

/// Durable, keyed store of past parameter outcomes.
///
/// One pattern per (use_case, model_id, rounded temperature, rounded
/// nucleus_p, max_tokens) identity; repeat reports fold into running
/// averages. The store flushes to its [`PatternStorage`] backend every
/// `flush_every` writes rather than on every write.
pub struct PatternStore {
    state: Mutex<StoreState>,
    storage: Arc<dyn PatternStorage>,
    flush_every: u32,
}

impl PatternStore {
    /// Open a store over the given backend, loading any persisted patterns.
    ///
    /// A failing or corrupt backend is logged and treated as an empty
    /// store; it never prevents the optimizer from starting.
    pub async fn open(storage: Arc<dyn PatternStorage>, flush_every: u32) -> Self {
        let patterns = match storage.load().await {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!(error = %e, "failed to load pattern store, starting empty");
                HashMap::new()
            }
        };

        Self {
            state: Mutex::new(StoreState {
                patterns,
                writes_since_flush: 0,
            }),
            storage,
            flush_every: flush_every.max(1),
        }
    }

    /// Open a JSON-file store as described by the `[history]` config
    /// section.
    pub async fn from_config(config: &HistoryConfig) -> Self {
        let storage = Arc::new(JsonFileStorage::new(config.patterns_path.clone()));
        Self::open(storage, config.flush_every).await
    }

    /// An empty store over the given backend (no load). Used by tests and
    /// by callers that bootstrap from sessions instead of a file.
    pub fn empty(storage: Arc<dyn PatternStorage>, flush_every: u32) -> Self {
        Self {
            state: Mutex::new(StoreState {
                patterns: HashMap::new(),
                writes_since_flush: 0,
            }),
            storage,
            flush_every: flush_every.max(1),
        }
    }

    /// Patterns matching (use_case, model_id), best first.
    ///
    /// Sorted by success score then recency, both descending, truncated to
    /// `limit`.
    pub fn get_relevant(
        &self,
        use_case: UseCase,
        model_id: &str,
        limit: usize,
    ) -> Vec<HistoricalPattern> {
        let state = self.state.lock().expect("pattern store lock poisoned");
        let mut relevant: Vec<HistoricalPattern> = state
            .patterns
            .values()
            .filter(|p| p.use_case == use_case && p.model_id == model_id)
            .cloned()
            .collect();
        drop(state);

        relevant.sort_by(|a, b| {
            b.success_score
                .partial_cmp(&a.success_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.last_used.cmp(&a.last_used))
        });
        relevant.truncate(limit);
        relevant
    }

    /// Record one parameter outcome.
    ///
    /// Existing identity keys fold into running averages; latency and cost
    /// averages only absorb positive samples. Every `flush_every`th write
    /// snapshots the map and persists it outside the lock; persistence
    /// failures are logged, never propagated.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        &self,
        use_case: UseCase,
        model_id: &str,
        temperature: f64,
        nucleus_p: f64,
        max_tokens: u32,
        success_score: f64,
        latency_ms: f64,
        cost: f64,
    ) {
        let key =
            HistoricalPattern::identity_key(use_case, model_id, temperature, nucleus_p, max_tokens);
        let success_score = success_score.clamp(0.0, 1.0);
        let now = Utc::now();

        let snapshot = {
            let mut state = self.state.lock().expect("pattern store lock poisoned");

            match state.patterns.get_mut(&key) {
                Some(pattern) => {
                    pattern.usage_count += 1;
                    let n = pattern.usage_count as f64;
                    pattern.success_score =
                        (pattern.success_score * (n - 1.0) + success_score) / n;
                    if latency_ms > 0.0 {
                        pattern.avg_latency_ms =
                            (pattern.avg_latency_ms * (n - 1.0) + latency_ms) / n;
                    }
                    if cost > 0.0 {
                        pattern.avg_cost = (pattern.avg_cost * (n - 1.0) + cost) / n;
                    }
                    pattern.last_used = now;
                }
                None => {
                    state.patterns.insert(
                        key.clone(),
                        HistoricalPattern {
                            use_case,
                            model_id: model_id.to_string(),
                            temperature,
                            nucleus_p,
                            max_tokens,
                            success_score,
                            usage_count: 1,
                            last_used: now,
                            avg_latency_ms: latency_ms.max(0.0),
                            avg_cost: cost.max(0.0),
                        },
                    );
                }
            }

            state.writes_since_flush += 1;
            if state.writes_since_flush >= self.flush_every {
                state.writes_since_flush = 0;
                // Snapshot under the lock, write outside it.
                Some(state.patterns.clone())
            } else {
                None
            }
        };

        debug!(key = %key, success_score, "recorded pattern outcome");

        if let Some(patterns) = snapshot {
            if let Err(e) = self.storage.save(&patterns).await {
                warn!(error = %e, "failed to flush pattern store");
            } else {
                info!(patterns = patterns.len(), "flushed pattern store");
            }
        }
    }

    /// Persist the current state immediately.
    pub async fn flush(&self) -> Result<(), TunesmithError> {
        let snapshot = {
            let mut state = self.state.lock().expect("pattern store lock poisoned");
            state.writes_since_flush = 0;
            state.patterns.clone()
        };
        self.storage.save(&snapshot).await
    }

    /// Look up a single pattern by identity key. Test and tooling helper.
    pub fn get(&self, key: &str) -> Option<HistoricalPattern> {
        let state = self.state.lock().expect("pattern store lock poisoned");
        state.patterns.get(key).cloned()
    }

    /// Number of distinct patterns in the store.
    pub fn len(&self) -> usize {
        let state = self.state.lock().expect("pattern store lock poisoned");
        state.patterns.len()
    }

    /// Whether the store holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts per use-case for operator visibility.
    pub fn summary(&self) -> StoreSummary {
        let state = self.state.lock().expect("pattern store lock poisoned");
        let mut per_use_case: HashMap<UseCase, usize> = HashMap::new();
        for pattern in state.patterns.values() {
            *per_use_case.entry(pattern.use_case).or_insert(0) += 1;
        }
        StoreSummary {
            pattern_count: state.patterns.len(),
            per_use_case,
        }
    }
}
