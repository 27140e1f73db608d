// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration data model with strict unknown-field rejection.
//!
//! Every field carries a serde default so an empty `tunesmith.toml` (or no
//! file at all) yields a fully working configuration.

use serde::{Deserialize, Serialize};

/// Top-level Tunesmith configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TunesmithConfig {
    /// Optimizer cache settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Historical pattern store settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Cache behavior of the optimization coordinator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Seconds a cached recommendation stays fresh.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum live entries per cache map. When exceeded after TTL
    /// eviction, the oldest half is dropped.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_cache_max_entries() -> usize {
    100
}

/// Durable storage and bootstrap behavior of the pattern store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Path of the JSON pattern file. A missing file yields an empty store.
    #[serde(default = "default_patterns_path")]
    pub patterns_path: String,

    /// Flush the store to disk every Nth write.
    #[serde(default = "default_flush_every")]
    pub flush_every: u32,

    /// How many recent sessions the bootstrap-learning scan examines.
    #[serde(default = "default_bootstrap_session_limit")]
    pub bootstrap_session_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            patterns_path: default_patterns_path(),
            flush_every: default_flush_every(),
            bootstrap_session_limit: default_bootstrap_session_limit(),
        }
    }
}

fn default_patterns_path() -> String {
    "tunesmith_patterns.json".to_string()
}

fn default_flush_every() -> u32 {
    5
}

fn default_bootstrap_session_limit() -> usize {
    50
}
