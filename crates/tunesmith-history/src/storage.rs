// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pluggable durable storage for the pattern store.
//!
//! The store itself only ever sees the `load`/`save` seam, so the JSON file
//! backend here can be swapped for a database or remote store without
//! touching the optimizer logic.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};
use tunesmith_core::{HistoricalPattern, TunesmithError};

/// Durable load/save of the flat identity-key to pattern mapping.
#[async_trait]
pub trait PatternStorage: Send + Sync {
    /// Load the persisted mapping. Implementations must tolerate partial
    /// corruption: skip bad entries, keep the rest.
    async fn load(&self) -> Result<HashMap<String, HistoricalPattern>, TunesmithError>;

    /// Persist a snapshot of the mapping.
    async fn save(&self, patterns: &HashMap<String, HistoricalPattern>)
        -> Result<(), TunesmithError>;
}

/// JSON-file backend: one flat object mapping identity keys to patterns.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a backend for the given file path. The file need not exist
    /// yet; a missing file loads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PatternStorage for JsonFileStorage {
    async fn load(&self) -> Result<HashMap<String, HistoricalPattern>, TunesmithError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no pattern file yet, starting empty");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(TunesmithError::storage(e)),
        };

        // Parse the outer object leniently: a malformed entry is skipped
        // and logged, never fatal.
        let raw: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&content)
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "pattern file is not a JSON object, starting empty"
                );
                return Ok(HashMap::new());
            }
        };

        let mut patterns = HashMap::with_capacity(raw.len());
        let mut skipped = 0usize;
        for (key, value) in raw {
            match serde_json::from_value::<HistoricalPattern>(value) {
                Ok(pattern) => {
                    patterns.insert(key, pattern);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(key = %key, error = %e, "skipping malformed pattern entry");
                }
            }
        }

        info!(
            path = %self.path.display(),
            loaded = patterns.len(),
            skipped,
            "loaded pattern file"
        );
        Ok(patterns)
    }

    async fn save(
        &self,
        patterns: &HashMap<String, HistoricalPattern>,
    ) -> Result<(), TunesmithError> {
        let json =
            serde_json::to_string_pretty(patterns).map_err(TunesmithError::storage)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(TunesmithError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tunesmith_core::UseCase;

    fn sample_pattern() -> HistoricalPattern {
        HistoricalPattern {
            use_case: UseCase::Analysis,
            model_id: "m1".to_string(),
            temperature: 0.3,
            nucleus_p: 0.9,
            max_tokens: 1500,
            success_score: 0.8,
            usage_count: 3,
            last_used: Utc::now(),
            avg_latency_ms: 120.0,
            avg_cost: 0.002,
        }
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nope.json"));
        let patterns = storage.load().await.unwrap();
        assert!(patterns.is_empty());
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("patterns.json"));

        let pattern = sample_pattern();
        let mut map = HashMap::new();
        map.insert(pattern.key(), pattern.clone());
        storage.save(&map).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(&pattern.key()).unwrap().usage_count, 3);
    }

    #[tokio::test]
    async fn malformed_entries_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");

        let good = sample_pattern();
        let good_json = serde_json::to_string(&good).unwrap();
        let content = format!(
            r#"{{"{}": {good_json}, "bad-entry": {{"use_case": "not-a-case"}}}}"#,
            good.key()
        );
        std::fs::write(&path, content).unwrap();

        let storage = JsonFileStorage::new(&path);
        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.len(), 1, "good entry survives, bad entry skipped");
        assert!(loaded.contains_key(&good.key()));
    }

    #[tokio::test]
    async fn non_object_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        std::fs::write(&path, "this is not json at all").unwrap();

        let storage = JsonFileStorage::new(&path);
        let loaded = storage.load().await.unwrap();
        assert!(loaded.is_empty());
    }
}
